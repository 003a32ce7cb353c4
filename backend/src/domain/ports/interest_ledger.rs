//! Driving ports for applications and contacts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, InterestRecord, ListingKind, ListingTarget, ResolvedInterest, UserId};

/// Recording interest in someone else's listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestCommand: Send + Sync {
    /// Apply to a posting.
    async fn apply(
        &self,
        actor: &UserId,
        posting_id: Uuid,
        message: Option<String>,
    ) -> Result<InterestRecord, Error>;

    /// Contact a candidate.
    async fn contact(
        &self,
        actor: &UserId,
        candidate_id: Uuid,
        message: Option<String>,
    ) -> Result<InterestRecord, Error>;
}

/// Reading the interest ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestQuery: Send + Sync {
    /// Whether `actor` already acted on `target`.
    async fn has_acted(&self, actor: &UserId, target: ListingTarget) -> Result<bool, Error>;

    /// Number of actors that acted on `target`.
    async fn count_for(&self, target: ListingTarget) -> Result<u64, Error>;

    /// The actor's own applications or contacts with their targets.
    async fn list_mine(
        &self,
        actor: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ResolvedInterest>, Error>;

    /// Interest received on listings of `kind` owned by `owner`.
    async fn list_received(
        &self,
        owner: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ResolvedInterest>, Error>;
}
