//! Port abstraction for applying example data seeds.
//!
//! Adapters insert the seed run marker and the generated postings in one
//! transaction, so a seed name is applied at most once.

use async_trait::async_trait;

use crate::domain::Posting;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by example data seed repository adapters.
    pub enum ExampleDataSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "example data seeding connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "example data seeding query failed: {message}",
    }
}

/// Result of attempting to record a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// Seed was newly recorded and its postings inserted.
    Applied,
    /// Seed was already recorded; nothing was written.
    AlreadySeeded,
}

/// Request payload for applying a seed run.
#[derive(Debug, Clone)]
pub struct ExampleDataSeedRequest {
    /// Seed name recorded in the seed run table.
    pub seed_key: String,
    /// Number of postings generated for the seed.
    pub posting_count: i32,
    /// RNG seed value used for deterministic generation.
    pub seed: i64,
    /// Generated postings to persist.
    pub postings: Vec<Posting>,
}

/// Port for applying example data seeds in a single transaction.
///
/// Implementations must:
/// - Insert a seed run record guarded by `ON CONFLICT DO NOTHING`.
/// - Insert the postings only when the seed run row was new.
/// - Roll back all changes if any step fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExampleDataSeedRepository: Send + Sync {
    /// Apply a seed run and persist the generated postings.
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError>;
}
