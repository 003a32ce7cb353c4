//! Driven port for sign-in accounts.

use async_trait::async_trait;

use crate::domain::{PasswordDigest, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// The email is already registered.
        Duplicate { message: String } => "account already exists: {message}",
    }
}

/// Stored credentials for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Identity.
    pub id: UserId,
    /// Normalised email.
    pub email: String,
    /// Argon2id password hash.
    pub digest: PasswordDigest,
}

/// Storage for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up an account by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError>;

    /// Store an account and its initial profile atomically.
    async fn create(
        &self,
        account: &Account,
        profile: &UserProfile,
    ) -> Result<(), AccountRepositoryError>;

    /// Replace the password hash of `id`; `false` when no account matched.
    async fn update_digest(
        &self,
        id: &UserId,
        digest: &PasswordDigest,
    ) -> Result<bool, AccountRepositoryError>;
}
