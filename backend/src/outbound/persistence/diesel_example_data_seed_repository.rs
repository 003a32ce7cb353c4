//! PostgreSQL-backed example data seeding adapter.
//!
//! This adapter implements the `ExampleDataSeedRepository` port, applying
//! example data within a single transaction. It records the seed run and
//! inserts the generated postings atomically; postings that already exist are
//! left untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewExampleDataRunRow, NewPostingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{example_data_runs, postings};

/// Diesel-backed implementation of the example data seeding repository.
#[derive(Clone)]
pub struct DieselExampleDataSeedRepository {
    pool: DbPool,
}

impl DieselExampleDataSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use jobboard::outbound::persistence::{
    ///     DbPool, DieselExampleDataSeedRepository, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost")).await?;
    /// let repository = DieselExampleDataSeedRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> ExampleDataSeedRepositoryError {
    map_basic_pool_error(error, ExampleDataSeedRepositoryError::connection)
}

/// Map Diesel errors to domain persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> ExampleDataSeedRepositoryError {
    map_basic_diesel_error(
        error,
        ExampleDataSeedRepositoryError::query,
        ExampleDataSeedRepositoryError::connection,
    )
}

#[async_trait]
impl ExampleDataSeedRepository for DieselExampleDataSeedRepository {
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError> {
        let ExampleDataSeedRequest {
            seed_key,
            posting_count,
            seed,
            postings: seeded,
        } = request;
        let posting_rows: Vec<NewPostingRow<'_>> = seeded.iter().map(NewPostingRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = conn
            .transaction(|conn| {
                async move {
                    let new_run = NewExampleDataRunRow {
                        seed_key: seed_key.as_str(),
                        posting_count,
                        seed,
                    };

                    let rows_affected = diesel::insert_into(example_data_runs::table)
                        .values(&new_run)
                        .on_conflict(example_data_runs::seed_key)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    if rows_affected == 0 {
                        return Ok(SeedingResult::AlreadySeeded);
                    }

                    if posting_rows.is_empty() {
                        return Ok(SeedingResult::Applied);
                    }

                    diesel::insert_into(postings::table)
                        .values(&posting_rows)
                        .on_conflict(postings::id)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    Ok(SeedingResult::Applied)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(result)
    }
}
