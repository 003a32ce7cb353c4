//! Driven port for user profile storage.

use async_trait::async_trait;

use crate::domain::{Role, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
        /// A profile already exists for this identity.
        Duplicate { message: String } => "profile already exists: {message}",
        /// A stored row violated a domain invariant.
        Corrupt { message: String } => "stored profile is invalid: {message}",
    }
}

/// Storage for profiles keyed by identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Fetch a profile.
    async fn find(&self, id: &UserId) -> Result<Option<UserProfile>, UserProfileRepositoryError>;

    /// Store a new profile.
    async fn insert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError>;

    /// Overwrite the editable fields and `updated_at`.
    async fn update(&self, profile: &UserProfile) -> Result<bool, UserProfileRepositoryError>;

    /// Every profile, newest first.
    async fn list_all(&self) -> Result<Vec<UserProfile>, UserProfileRepositoryError>;

    /// Change a user's role.
    async fn set_role(&self, id: &UserId, role: Role) -> Result<bool, UserProfileRepositoryError>;

    /// Remove a profile row.
    async fn delete(&self, id: &UserId) -> Result<bool, UserProfileRepositoryError>;
}
