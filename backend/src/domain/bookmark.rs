//! Per-user favourites of postings and candidates.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Listing, ListingTarget, UserId};

/// A user's favourite mark on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    /// Identifier.
    pub id: Uuid,
    /// Owning user.
    #[schema(value_type = String)]
    pub user: UserId,
    /// Bookmarked listing.
    pub target: ListingTarget,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Outcome of toggling a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BookmarkToggle {
    /// A new bookmark was stored.
    Added {
        /// The stored record.
        bookmark: BookmarkRecord,
    },
    /// The existing bookmark was removed.
    Removed,
}

impl BookmarkToggle {
    /// Whether the listing is bookmarked after the toggle.
    pub const fn is_bookmarked(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// A bookmark together with its listing; `None` once the listing is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBookmark {
    /// Stored record.
    pub bookmark: BookmarkRecord,
    /// Target listing, when it still exists.
    pub listing: Option<Listing>,
}
