//! Deterministic posting generation from seed definitions.
//!
//! The same seed definition and vocabulary always produce identical output.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::SeedDefinition;
use crate::seed::ExamplePostingSeed;
use crate::vocabulary::Vocabulary;

/// Generates example postings from a seed definition.
///
/// Each field is drawn independently from the matching vocabulary list using
/// a `ChaCha8` RNG seeded from the definition, so identifiers and text are
/// reproducible across runs and platforms.
///
/// # Errors
///
/// Returns [`GenerationError::EmptyVocabulary`] when any list is empty and at
/// least one posting is requested.
///
/// # Example
///
/// ```
/// use example_data::{SeedDefinition, Vocabulary, generate_example_postings};
///
/// let seed = SeedDefinition::new("demo", 7, 2);
/// let first = generate_example_postings(&Vocabulary::default(), &seed).expect("generated");
/// let second = generate_example_postings(&Vocabulary::default(), &seed).expect("generated");
///
/// assert_eq!(first, second);
/// ```
pub fn generate_example_postings(
    vocabulary: &Vocabulary,
    seed: &SeedDefinition,
) -> Result<Vec<ExamplePostingSeed>, GenerationError> {
    if seed.posting_count() == 0 {
        return Ok(Vec::new());
    }
    ensure_populated(vocabulary)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed.seed());
    (0..seed.posting_count())
        .map(|_| generate_posting(&mut rng, vocabulary))
        .collect()
}

fn ensure_populated(vocabulary: &Vocabulary) -> Result<(), GenerationError> {
    let lists: [(&'static str, &[String]); 5] = [
        ("titles", &vocabulary.titles),
        ("locations", &vocabulary.locations),
        ("styles", &vocabulary.styles),
        ("experiences", &vocabulary.experiences),
        ("compensations", &vocabulary.compensations),
    ];
    match lists.iter().find(|(_, values)| values.is_empty()) {
        Some((field, _)) => Err(GenerationError::EmptyVocabulary { field: *field }),
        None => Ok(()),
    }
}

fn pick(
    rng: &mut ChaCha8Rng,
    values: &[String],
    field: &'static str,
) -> Result<String, GenerationError> {
    values
        .choose(rng)
        .cloned()
        .ok_or(GenerationError::EmptyVocabulary { field })
}

fn generate_posting(
    rng: &mut ChaCha8Rng,
    vocabulary: &Vocabulary,
) -> Result<ExamplePostingSeed, GenerationError> {
    let id = Uuid::from_u128(rng.random());
    Ok(ExamplePostingSeed {
        id,
        title: pick(rng, &vocabulary.titles, "titles")?,
        location: pick(rng, &vocabulary.locations, "locations")?,
        style: pick(rng, &vocabulary.styles, "styles")?,
        experience: pick(rng, &vocabulary.experiences, "experiences")?,
        compensation: pick(rng, &vocabulary.compensations, "compensations")?,
        description: vocabulary.description.clone(),
    })
}
