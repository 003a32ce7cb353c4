//! Behavioural tests for example posting generation.
//!
//! These scenarios load a registry from disk, generate postings for a named
//! seed and check the batch is reproducible and validated.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

mod test_support;

use example_data::{
    ExamplePostingSeed, GenerationError, RegistryError, SeedRegistry, Vocabulary,
    generate_example_postings,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use test_support::RegistryFile;

#[derive(Default, ScenarioState)]
struct World {
    registry: Slot<SeedRegistry>,
    vocabulary: Slot<Vocabulary>,
    first_batch: Slot<Vec<ExamplePostingSeed>>,
    second_batch: Slot<Vec<ExamplePostingSeed>>,
    registry_error: Slot<RegistryError>,
    generation_error: Slot<GenerationError>,
}

impl World {
    fn vocabulary(&self) -> Vocabulary {
        self.vocabulary.get().unwrap_or_default()
    }

    /// Generate for `name`, optionally overriding the count.
    fn generate(&self, name: &str, count: Option<usize>) -> Option<Vec<ExamplePostingSeed>> {
        let registry = self.registry.get().expect("registry loaded");
        let seed = match registry.find_seed(name.trim_matches('"')) {
            Ok(seed) => seed,
            Err(error) => {
                self.registry_error.set(error);
                return None;
            }
        };
        let seed = count.map_or_else(|| seed.clone(), |n| seed.with_posting_count(n));
        match generate_example_postings(&self.vocabulary(), &seed) {
            Ok(postings) => Some(postings),
            Err(error) => {
                self.generation_error.set(error);
                None
            }
        }
    }

    fn first_batch(&self) -> Vec<ExamplePostingSeed> {
        self.first_batch.get().expect("postings generated")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("a registry file with seed {name} producing {count} postings")]
fn a_registry_file(world: &World, name: String, count: usize) {
    let file = RegistryFile::single_seed(name.trim_matches('"'), 2026, count)
        .expect("write registry");
    let registry = SeedRegistry::from_file(file.path()).expect("registry loads");
    world.registry.set(registry);
}

#[given("a vocabulary without titles")]
fn a_vocabulary_without_titles(world: &World) {
    world.vocabulary.set(Vocabulary {
        titles: Vec::new(),
        ..Vocabulary::default()
    });
}

#[when("postings are generated for {name}")]
fn postings_are_generated(world: &World, name: String) {
    if let Some(postings) = world.generate(&name, None) {
        world.first_batch.set(postings);
    }
}

#[when("postings are generated again for {name}")]
fn postings_are_generated_again(world: &World, name: String) {
    if let Some(postings) = world.generate(&name, None) {
        world.second_batch.set(postings);
    }
}

#[when("{count} postings are requested from {name}")]
fn postings_are_requested(world: &World, count: usize, name: String) {
    if let Some(postings) = world.generate(&name, Some(count)) {
        world.first_batch.set(postings);
    }
}

#[then("{count} postings are produced")]
fn postings_are_produced(world: &World, count: usize) {
    assert_eq!(world.first_batch().len(), count);
}

#[then("both batches are identical")]
fn both_batches_are_identical(world: &World) {
    let second = world.second_batch.get().expect("second batch generated");
    assert_eq!(world.first_batch(), second);
}

#[then("every posting has a title and a style")]
fn every_posting_is_populated(world: &World) {
    for posting in world.first_batch() {
        assert!(!posting.title.trim().is_empty());
        assert!(!posting.style.trim().is_empty());
        assert!(!posting.location.trim().is_empty());
    }
}

#[then("a seed not found error is reported")]
fn seed_not_found_is_reported(world: &World) {
    let error = world.registry_error.get().expect("registry error");
    assert!(matches!(error, RegistryError::SeedNotFound { .. }));
    assert!(world.first_batch.get().is_none());
}

#[then("an empty vocabulary error names {field}")]
fn empty_vocabulary_is_reported(world: &World, field: String) {
    let error = world.generation_error.get().expect("generation error");
    match error {
        GenerationError::EmptyVocabulary { field: actual } => {
            assert_eq!(actual, field.trim_matches('"'));
        }
    }
    assert!(world.first_batch.get().is_none());
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "A named seed generates a reproducible batch"
)]
fn reproducible_batch(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "The posting count can be overridden"
)]
fn count_override(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Unknown seeds are reported"
)]
fn unknown_seed(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "An empty vocabulary cannot produce postings"
)]
fn empty_vocabulary(world: World) {
    let _ = world;
}
