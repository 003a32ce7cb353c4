//! PostgreSQL-backed profile and account adapters using Diesel ORM.
//!
//! Accounts and profiles share the user id. Sign-up writes both rows in one
//! transaction so an account never exists without its profile.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{
    Account, AccountRepository, AccountRepositoryError, UserProfileRepository,
    UserProfileRepositoryError,
};
use crate::domain::{PasswordDigest, Role, UserId, UserProfile};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_unique_diesel_error};
use super::models::{AccountRow, NewAccountRow, ProfileRow, ProfileValues};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, profiles};

/// Diesel-backed implementation of the `UserProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_profile_pool_error(error: PoolError) -> UserProfileRepositoryError {
    map_basic_pool_error(error, UserProfileRepositoryError::connection)
}

fn map_profile_diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_unique_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
        UserProfileRepositoryError::duplicate,
    )
}

fn row_to_profile(row: ProfileRow) -> Result<UserProfile, UserProfileRepositoryError> {
    UserProfile::try_from(row).map_err(UserProfileRepositoryError::corrupt)
}

#[async_trait]
impl UserProfileRepository for DieselProfileRepository {
    async fn find(&self, id: &UserId) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        let row = profiles::table
            .find(*id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_profile_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        diesel::insert_into(profiles::table)
            .values(ProfileValues::from(profile))
            .execute(&mut conn)
            .await
            .map_err(map_profile_diesel_error)?;
        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> Result<bool, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        let updated = diesel::update(profiles::table.find(*profile.id.as_uuid()))
            .set(ProfileValues::from(profile))
            .execute(&mut conn)
            .await
            .map_err(map_profile_diesel_error)?;
        Ok(updated > 0)
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        let rows: Vec<ProfileRow> = profiles::table
            .order(profiles::created_at.desc())
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_profile_diesel_error)?;
        rows.into_iter().map(row_to_profile).collect()
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<bool, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        let updated = diesel::update(profiles::table.find(*id.as_uuid()))
            .set(profiles::role.eq(role.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_profile_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        let deleted = diesel::delete(profiles::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_profile_diesel_error)?;
        Ok(deleted > 0)
    }
}

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_account_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_unique_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
        AccountRepositoryError::duplicate,
    )
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_basic_pool_error(error, AccountRepositoryError::connection))?;
        let row = accounts::table
            .filter(accounts::email.eq(email))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_account_diesel_error)?;
        Ok(row.map(|row| {
            let (id, email, digest) = row.into_parts();
            Account { id, email, digest }
        }))
    }

    async fn create(
        &self,
        account: &Account,
        profile: &UserProfile,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_basic_pool_error(error, AccountRepositoryError::connection))?;
        let account_row = NewAccountRow {
            id: *account.id.as_uuid(),
            email: account.email.as_str(),
            password_hash: account.digest.as_phc(),
        };
        let profile_row = ProfileValues::from(profile);

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(accounts::table)
                    .values(&account_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(profiles::table)
                    .values(&profile_row)
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_account_diesel_error)
    }

    async fn update_digest(
        &self,
        id: &UserId,
        digest: &PasswordDigest,
    ) -> Result<bool, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_basic_pool_error(error, AccountRepositoryError::connection))?;
        let updated = diesel::update(accounts::table.find(*id.as_uuid()))
            .set(accounts::password_hash.eq(digest.as_phc()))
            .execute(&mut conn)
            .await
            .map_err(map_account_diesel_error)?;
        Ok(updated > 0)
    }
}
