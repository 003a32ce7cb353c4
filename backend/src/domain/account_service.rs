//! Account service implementing sign-up and login.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{Account, AccountRepository, LoginService};
use crate::domain::repository_errors::map_account_error;
use crate::domain::{
    CurrentUser, Error, LoginCredentials, NewPassword, PasswordDigest, PasswordHashingError, UserId,
    UserProfile,
};

/// Account-backed [`LoginService`].
#[derive(Clone)]
pub struct AccountService<A> {
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<A> AccountService<A> {
    /// Create a new service.
    pub fn new(accounts: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self { accounts, clock }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn hashing_failed(error: PasswordHashingError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<A> LoginService for AccountService<A>
where
    A: AccountRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<CurrentUser, Error> {
        let account = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_account_error)?
            .ok_or_else(invalid_credentials)?;
        if !account.digest.verify(credentials.password()) {
            return Err(invalid_credentials());
        }
        Ok(CurrentUser {
            id: account.id,
            email: account.email,
        })
    }

    async fn sign_up(&self, credentials: &LoginCredentials) -> Result<CurrentUser, Error> {
        let id = UserId::random();
        let email = credentials.email().to_owned();
        let account = Account {
            id: id.clone(),
            email: email.clone(),
            digest: PasswordDigest::derive(credentials.password()).map_err(hashing_failed)?,
        };
        let profile = UserProfile::new_default(id.clone(), &email, self.clock.utc());
        self.accounts
            .create(&account, &profile)
            .await
            .map_err(map_account_error)?;
        info!(user_id = %id, "account created");
        Ok(CurrentUser { id, email })
    }

    async fn change_password(&self, user: &UserId, password: &NewPassword) -> Result<(), Error> {
        let digest = PasswordDigest::derive(password.as_str()).map_err(hashing_failed)?;
        let updated = self
            .accounts
            .update_digest(user, &digest)
            .await
            .map_err(map_account_error)?;
        if !updated {
            return Err(Error::not_found("account not found"));
        }
        info!(user_id = %user, "password changed");
        Ok(())
    }
}
