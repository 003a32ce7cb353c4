//! Driven port for the application/contact ledger.

use async_trait::async_trait;

use crate::domain::{InterestRecord, ListingKind, ListingTarget, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by interest repository adapters.
    pub enum InterestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "interest repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "interest repository query failed: {message}",
        /// The actor already expressed interest in this target.
        Duplicate { message: String } => "interest already recorded: {message}",
        /// A stored row violated a domain invariant.
        Corrupt { message: String } => "stored interest is invalid: {message}",
    }
}

/// Storage for interest records.
///
/// Implementations enforce one record per actor and target; a second insert
/// fails with [`InterestRepositoryError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestRepository: Send + Sync {
    /// Store a record.
    async fn insert(&self, record: &InterestRecord) -> Result<(), InterestRepositoryError>;

    /// Whether `actor` already acted on `target`.
    async fn exists(
        &self,
        actor: &UserId,
        target: ListingTarget,
    ) -> Result<bool, InterestRepositoryError>;

    /// Number of records referencing `target`.
    async fn count_for(&self, target: ListingTarget) -> Result<u64, InterestRepositoryError>;

    /// Records created by `actor` against listings of `kind`, newest first.
    async fn list_by_actor(
        &self,
        actor: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<InterestRecord>, InterestRepositoryError>;

    /// Records referencing any of `targets`, newest first.
    async fn list_for_targets(
        &self,
        targets: &[ListingTarget],
    ) -> Result<Vec<InterestRecord>, InterestRepositoryError>;
}
