//! Driving ports for creating, browsing and moving listings through their
//! lifecycle.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Badge, CandidateDraft, Error, ExtensionDays, Listing, ListingFilter, ListingKind,
    ListingTarget, PostingDraft, UserId,
};

/// A listing with its badge at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    /// Stored listing.
    pub listing: Listing,
    /// Derived status badge.
    pub badge: Badge,
}

/// Detail view adding the number of applications or contacts received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    /// Stored listing.
    pub listing: Listing,
    /// Derived status badge.
    pub badge: Badge,
    /// Interest records referencing the listing.
    pub interest_count: u64,
}

/// Mutating listing use-cases. Lifecycle changes require the owner or an
/// admin and return the fresh state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCommand: Send + Sync {
    /// Publish a posting owned by `owner`.
    async fn create_posting(&self, owner: &UserId, draft: PostingDraft)
    -> Result<ListingView, Error>;

    /// Publish a candidate profile owned by `owner`.
    async fn create_candidate(
        &self,
        owner: &UserId,
        draft: CandidateDraft,
    ) -> Result<ListingView, Error>;

    /// Close a listing, stamping `closed_at`.
    async fn close(&self, actor: &UserId, target: ListingTarget) -> Result<ListingView, Error>;

    /// Reopen a listing with a fresh expiry window.
    async fn reopen(&self, actor: &UserId, target: ListingTarget) -> Result<ListingView, Error>;

    /// Reset the expiry to `days` from now.
    async fn extend(
        &self,
        actor: &UserId,
        target: ListingTarget,
        days: ExtensionDays,
    ) -> Result<ListingView, Error>;

    /// Delete a listing.
    async fn delete(&self, actor: &UserId, target: ListingTarget) -> Result<(), Error>;
}

/// Read-only listing use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// One listing with badge and interest count.
    async fn get(&self, target: ListingTarget) -> Result<ListingDetail, Error>;

    /// Open listings of `kind` kept by `filter`, newest first.
    async fn list_open(
        &self,
        kind: ListingKind,
        filter: ListingFilter,
    ) -> Result<Vec<ListingView>, Error>;

    /// Listings of `kind` owned by `owner`, newest first.
    async fn list_owned(&self, owner: &UserId, kind: ListingKind)
    -> Result<Vec<ListingView>, Error>;
}
