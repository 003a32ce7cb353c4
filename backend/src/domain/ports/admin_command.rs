//! Driving port for moderation. Every call requires the `admin` role.

use async_trait::async_trait;

use crate::domain::{Error, ListingKind, ListingTarget, UserId, UserProfile};

use super::ListingView;

/// Admin-only use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminCommand: Send + Sync {
    /// Every listing of `kind`, newest first.
    async fn list_listings(
        &self,
        admin: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ListingView>, Error>;

    /// Every profile, newest first.
    async fn list_profiles(&self, admin: &UserId) -> Result<Vec<UserProfile>, Error>;

    /// Delete any listing.
    async fn delete_listing(&self, admin: &UserId, target: ListingTarget) -> Result<(), Error>;

    /// Swap a user between `user` and `admin`.
    async fn toggle_role(&self, admin: &UserId, user: &UserId) -> Result<UserProfile, Error>;

    /// Delete a profile row.
    async fn delete_profile(&self, admin: &UserId, user: &UserId) -> Result<(), Error>;
}
