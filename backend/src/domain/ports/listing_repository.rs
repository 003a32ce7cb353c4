//! Driven port for posting and candidate profile storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CandidateProfile, Lifecycle, Listing, ListingKind, ListingTarget, Posting, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by listing repository adapters.
    pub enum ListingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "listing repository query failed: {message}",
        /// A stored row violated a domain invariant.
        Corrupt { message: String } => "stored listing is invalid: {message}",
    }
}

/// Storage for both listing tables.
///
/// Lists are ordered newest first by creation time. Lifecycle updates and
/// deletes are single statements; they return `false` when no row matched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Store a new posting.
    async fn insert_posting(&self, posting: &Posting) -> Result<(), ListingRepositoryError>;

    /// Store a new candidate profile.
    async fn insert_candidate(
        &self,
        candidate: &CandidateProfile,
    ) -> Result<(), ListingRepositoryError>;

    /// Fetch one listing.
    async fn find(&self, target: ListingTarget) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Fetch several listings at once; missing ids are skipped.
    async fn find_many(
        &self,
        targets: &[ListingTarget],
    ) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Active listings whose expiry is at or after `now`.
    async fn list_open(
        &self,
        kind: ListingKind,
        now: DateTime<Utc>,
    ) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Every listing of `kind` owned by `owner`.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Every listing of `kind`.
    async fn list_all(&self, kind: ListingKind) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Persist status and timestamps.
    async fn update_lifecycle(
        &self,
        target: ListingTarget,
        lifecycle: &Lifecycle,
    ) -> Result<bool, ListingRepositoryError>;

    /// Remove a listing.
    async fn delete(&self, target: ListingTarget) -> Result<bool, ListingRepositoryError>;
}
