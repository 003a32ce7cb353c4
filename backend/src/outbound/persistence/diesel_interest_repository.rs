//! PostgreSQL-backed `InterestRepository` implementation using Diesel ORM.
//!
//! The partial unique indexes on `(actor_id, posting_id)` and
//! `(actor_id, candidate_id)` make a second application or contact fail as a
//! unique violation, which surfaces as `InterestRepositoryError::Duplicate`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{InterestRepository, InterestRepositoryError};
use crate::domain::{InterestRecord, ListingKind, ListingTarget, UserId};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_unique_diesel_error};
use super::models::{InterestRow, NewInterestRow};
use super::pool::{DbPool, PoolError};
use super::schema::interests;

/// Diesel-backed implementation of the `InterestRepository` port.
#[derive(Clone)]
pub struct DieselInterestRepository {
    pool: DbPool,
}

impl DieselInterestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InterestRepositoryError {
    map_basic_pool_error(error, InterestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InterestRepositoryError {
    map_unique_diesel_error(
        error,
        InterestRepositoryError::query,
        InterestRepositoryError::connection,
        InterestRepositoryError::duplicate,
    )
}

fn rows_to_records(rows: Vec<InterestRow>) -> Result<Vec<InterestRecord>, InterestRepositoryError> {
    rows.into_iter()
        .map(|row| InterestRecord::try_from(row).map_err(InterestRepositoryError::corrupt))
        .collect()
}

fn target_ids(targets: &[ListingTarget], kind: ListingKind) -> Vec<Uuid> {
    targets
        .iter()
        .filter(|target| target.kind() == kind)
        .map(|target| target.id())
        .collect()
}

#[async_trait]
impl InterestRepository for DieselInterestRepository {
    async fn insert(&self, record: &InterestRecord) -> Result<(), InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(interests::table)
            .values(NewInterestRow::from(record))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn exists(
        &self,
        actor: &UserId,
        target: ListingTarget,
    ) -> Result<bool, InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let by_actor = interests::table.filter(interests::actor_id.eq(*actor.as_uuid()));
        let query = match target {
            ListingTarget::Posting(id) => {
                diesel::select(exists(by_actor.filter(interests::posting_id.eq(id))))
                    .get_result(&mut conn)
                    .await
            }
            ListingTarget::Candidate(id) => {
                diesel::select(exists(by_actor.filter(interests::candidate_id.eq(id))))
                    .get_result(&mut conn)
                    .await
            }
        };
        query.map_err(map_diesel_error)
    }

    async fn count_for(&self, target: ListingTarget) -> Result<u64, InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = match target {
            ListingTarget::Posting(id) => {
                interests::table
                    .filter(interests::posting_id.eq(id))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
            ListingTarget::Candidate(id) => {
                interests::table
                    .filter(interests::candidate_id.eq(id))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| InterestRepositoryError::corrupt("negative row count"))
    }

    async fn list_by_actor(
        &self,
        actor: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<InterestRecord>, InterestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let by_actor = interests::table
            .filter(interests::actor_id.eq(*actor.as_uuid()))
            .order(interests::created_at.desc())
            .select(InterestRow::as_select());
        let rows = match kind {
            ListingKind::Posting => {
                by_actor
                    .filter(interests::posting_id.is_not_null())
                    .load(&mut conn)
                    .await
            }
            ListingKind::Candidate => {
                by_actor
                    .filter(interests::candidate_id.is_not_null())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        rows_to_records(rows)
    }

    async fn list_for_targets(
        &self,
        targets: &[ListingTarget],
    ) -> Result<Vec<InterestRecord>, InterestRepositoryError> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }
        let posting_ids = target_ids(targets, ListingKind::Posting);
        let candidate_ids = target_ids(targets, ListingKind::Candidate);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = interests::table
            .filter(
                interests::posting_id
                    .eq_any(posting_ids)
                    .or(interests::candidate_id.eq_any(candidate_ids)),
            )
            .order(interests::created_at.desc())
            .select(InterestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_records(rows)
    }
}
