//! Example data seeding orchestration.
//!
//! Converts deterministic example postings from the registry into validated
//! domain postings, then delegates persistence to the seeding repository port.

use std::sync::Arc;

use example_data::{
    ExamplePostingSeed, GenerationError, RegistryError, SeedRegistry, Vocabulary,
    generate_example_postings,
};
use mockable::Clock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::ports::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult,
};
use crate::domain::{ListingValidationError, Posting, PostingDraft, UserId};

/// Owner recorded on every seeded posting.
pub const EXAMPLE_OWNER_ID: Uuid = Uuid::from_u128(0x6a0b_5e3d_0c1f_4b7e_9d2a_1f00_e5a7_7001);

/// Result of attempting to apply example data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Seed key used to record the run.
    pub seed_key: String,
    /// Number of postings generated and persisted.
    pub posting_count: usize,
    /// Persistence outcome for the seed run.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Posting generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated posting failed backend validation.
    #[error("generated posting failed validation: {0}")]
    PostingInvalid(#[from] ListingValidationError),
    /// Seed value cannot be represented in the database.
    #[error("seed value {seed} exceeds maximum representable value")]
    SeedOverflow { seed: u64 },
    /// Posting count cannot be represented in the database.
    #[error("posting count {count} exceeds maximum representable value")]
    PostingCountOverflow { count: usize },
    /// Persistence adapter failed while seeding.
    #[error("example data persistence error: {0}")]
    Persistence(#[from] ExampleDataSeedRepositoryError),
}

/// Service that orchestrates example data seeding.
#[derive(Clone)]
pub struct ExampleDataSeeder<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ExampleDataSeeder<R> {
    /// Create a new seeder with the given persistence adapter.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> ExampleDataSeeder<R>
where
    R: ExampleDataSeedRepository,
{
    /// Apply example data for a named seed within the registry.
    ///
    /// Seeded postings open at the current clock time with the default
    /// listing period.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] if registry lookup, generation,
    /// validation, or persistence fails.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
        posting_count_override: Option<usize>,
    ) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let seed_def = registry.find_seed(seed_name)?;
        let seed_key = seed_def.name().to_owned();
        let seed_value = seed_def.seed();
        let posting_count = posting_count_override.unwrap_or(seed_def.posting_count());
        let posting_count_i32 = i32::try_from(posting_count).map_err(|_| {
            ExampleDataSeedingError::PostingCountOverflow {
                count: posting_count,
            }
        })?;
        let seed_value_i64 = i64::try_from(seed_value)
            .map_err(|_| ExampleDataSeedingError::SeedOverflow { seed: seed_value })?;

        let seed_def = seed_def.with_posting_count(posting_count);
        let generated = generate_example_postings(&Vocabulary::default(), &seed_def)?;
        let owner = UserId::from_uuid(EXAMPLE_OWNER_ID);
        let now = self.clock.utc();
        let postings = generated
            .into_iter()
            .map(|seed| Posting::publish(seed.id, owner.clone(), draft_from_seed(seed), now))
            .collect::<Result<Vec<_>, _>>()?;

        let request = ExampleDataSeedRequest {
            seed_key: seed_key.clone(),
            posting_count: posting_count_i32,
            seed: seed_value_i64,
            postings,
        };
        let result = self.repository.seed_example_data(request).await?;

        Ok(ExampleDataSeedOutcome {
            seed_key,
            posting_count,
            result,
        })
    }
}

fn draft_from_seed(seed: ExamplePostingSeed) -> PostingDraft {
    PostingDraft {
        title: seed.title,
        location: seed.location,
        category: seed.style,
        experience: Some(seed.experience),
        compensation: Some(seed.compensation),
        description: Some(seed.description),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for example data seeding orchestration.

    use super::*;
    use crate::domain::ListingStatus;
    use crate::domain::ports::MockExampleDataSeedRepository;
    use crate::test_support::MutableClock;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    const REGISTRY_JSON: &str = r#"{
        "version": 1,
        "seeds": [{"name": "sunrise-flow", "seed": 42, "postingCount": 2}]
    }"#;

    fn registry() -> SeedRegistry {
        SeedRegistry::from_json(REGISTRY_JSON).expect("registry should parse")
    }

    fn seeder(repo: MockExampleDataSeedRepository) -> ExampleDataSeeder<MockExampleDataSeedRepository> {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        ExampleDataSeeder::new(Arc::new(repo), Arc::new(MutableClock::new(now)))
    }

    #[rstest]
    #[tokio::test]
    async fn seed_applies_for_new_seed() {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data()
            .withf(|request| {
                request.seed_key == "sunrise-flow"
                    && request.posting_count == 2
                    && request.seed == 42
                    && request.postings.len() == 2
                    && request.postings.iter().all(|posting| {
                        posting.owner.as_uuid() == &EXAMPLE_OWNER_ID
                            && posting.lifecycle.status() == ListingStatus::Active
                    })
            })
            .times(1)
            .return_once(|_| Ok(SeedingResult::Applied));

        let outcome = seeder(repo)
            .seed_from_registry(&registry(), "sunrise-flow", None)
            .await
            .expect("seed succeeds");

        assert_eq!(outcome.result, SeedingResult::Applied);
        assert_eq!(outcome.posting_count, 2);
        assert_eq!(outcome.seed_key, "sunrise-flow");
    }

    #[rstest]
    #[tokio::test]
    async fn seed_skips_when_already_seeded() {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data()
            .times(1)
            .return_once(|_| Ok(SeedingResult::AlreadySeeded));

        let outcome = seeder(repo)
            .seed_from_registry(&registry(), "sunrise-flow", None)
            .await
            .expect("seed succeeds");

        assert_eq!(outcome.result, SeedingResult::AlreadySeeded);
    }

    #[rstest]
    #[tokio::test]
    async fn count_override_changes_batch_size() {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data()
            .withf(|request| request.postings.len() == 5 && request.posting_count == 5)
            .times(1)
            .return_once(|_| Ok(SeedingResult::Applied));

        let outcome = seeder(repo)
            .seed_from_registry(&registry(), "sunrise-flow", Some(5))
            .await
            .expect("seed succeeds");

        assert_eq!(outcome.posting_count, 5);
    }

    #[rstest]
    #[tokio::test]
    async fn seed_rejects_unknown_seed() {
        let error = seeder(MockExampleDataSeedRepository::new())
            .seed_from_registry(&registry(), "missing-seed", None)
            .await
            .expect_err("missing seed should error");

        assert!(matches!(error, ExampleDataSeedingError::Registry(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn posting_count_overflow_is_rejected() {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data().times(0);

        let overflow_count = (i32::MAX as usize) + 1;
        let error = seeder(repo)
            .seed_from_registry(&registry(), "sunrise-flow", Some(overflow_count))
            .await
            .expect_err("overflow should be rejected");

        assert!(matches!(
            error,
            ExampleDataSeedingError::PostingCountOverflow { count } if count == overflow_count
        ));
    }

    #[rstest]
    fn blank_seed_title_is_rejected() {
        let seed = ExamplePostingSeed {
            id: Uuid::new_v4(),
            title: "   ".to_owned(),
            location: "Seoul Gangnam-gu".to_owned(),
            style: "Hatha".to_owned(),
            experience: "Any".to_owned(),
            compensation: "Negotiable".to_owned(),
            description: "Friendly studio.".to_owned(),
        };

        let result = Posting::publish(seed.id, UserId::random(), draft_from_seed(seed), Utc::now());
        assert!(matches!(
            result,
            Err(ListingValidationError::MissingField { field: "title" })
        ));
    }
}
