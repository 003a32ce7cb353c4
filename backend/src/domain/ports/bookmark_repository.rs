//! Driven port for the bookmark ledger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BookmarkRecord, ListingKind, ListingTarget, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by bookmark repository adapters.
    pub enum BookmarkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "bookmark repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "bookmark repository query failed: {message}",
        /// The user already bookmarked this target.
        Duplicate { message: String } => "bookmark already exists: {message}",
        /// A stored row violated a domain invariant.
        Corrupt { message: String } => "stored bookmark is invalid: {message}",
    }
}

/// Storage for bookmarks, unique per user and target.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// The user's bookmark on `target`, if any.
    async fn find(
        &self,
        user: &UserId,
        target: ListingTarget,
    ) -> Result<Option<BookmarkRecord>, BookmarkRepositoryError>;

    /// Store a bookmark.
    async fn insert(&self, record: &BookmarkRecord) -> Result<(), BookmarkRepositoryError>;

    /// Remove a bookmark by id.
    async fn delete(&self, id: Uuid) -> Result<bool, BookmarkRepositoryError>;

    /// The user's bookmarks on listings of `kind`, newest first.
    async fn list_by_user(
        &self,
        user: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<BookmarkRecord>, BookmarkRepositoryError>;
}
