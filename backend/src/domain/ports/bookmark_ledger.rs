//! Driving ports for bookmarks.

use async_trait::async_trait;

use crate::domain::{BookmarkToggle, Error, ListingKind, ListingTarget, ResolvedBookmark, UserId};

/// Adding and removing bookmarks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkCommand: Send + Sync {
    /// Remove the bookmark when present, otherwise add one.
    async fn toggle(&self, user: &UserId, target: ListingTarget) -> Result<BookmarkToggle, Error>;
}

/// Reading bookmarks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkQuery: Send + Sync {
    /// The user's bookmarks of `kind` with their listings.
    async fn list_mine(
        &self,
        user: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ResolvedBookmark>, Error>;
}
