//! Driving port for sign-up and login.
//!
//! Inbound adapters call this to authenticate credentials without knowing the
//! backing account store.

use async_trait::async_trait;

use crate::domain::{CurrentUser, Error, LoginCredentials, NewPassword, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<CurrentUser, Error>;

    /// Register a new account with a default profile.
    async fn sign_up(&self, credentials: &LoginCredentials) -> Result<CurrentUser, Error>;

    /// Replace the password of a signed-in account.
    async fn change_password(&self, user: &UserId, password: &NewPassword) -> Result<(), Error>;
}
