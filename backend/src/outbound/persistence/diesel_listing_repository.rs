//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.
//!
//! Postings and candidate profiles live in separate tables with the same
//! lifecycle columns. Lifecycle transitions are a single `UPDATE` of those
//! columns; the row count tells the service whether the listing still exists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{
    CandidateProfile, Lifecycle, Listing, ListingKind, ListingStatus, ListingTarget, Posting,
    UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    CandidateLifecycleUpdate, CandidateRow, NewCandidateRow, NewPostingRow, PostingLifecycleUpdate,
    PostingRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{candidates, postings};

/// Diesel-backed implementation of the `ListingRepository` port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListingRepositoryError {
    map_basic_pool_error(error, ListingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ListingRepositoryError {
    map_basic_diesel_error(
        error,
        ListingRepositoryError::query,
        ListingRepositoryError::connection,
    )
}

fn postings_to_listings(rows: Vec<PostingRow>) -> Result<Vec<Listing>, ListingRepositoryError> {
    rows.into_iter()
        .map(|row| {
            Posting::try_from(row)
                .map(Listing::Posting)
                .map_err(ListingRepositoryError::corrupt)
        })
        .collect()
}

fn candidates_to_listings(
    rows: Vec<CandidateRow>,
) -> Result<Vec<Listing>, ListingRepositoryError> {
    rows.into_iter()
        .map(|row| {
            CandidateProfile::try_from(row)
                .map(Listing::Candidate)
                .map_err(ListingRepositoryError::corrupt)
        })
        .collect()
}

fn split_targets(targets: &[ListingTarget]) -> (Vec<Uuid>, Vec<Uuid>) {
    targets
        .iter()
        .fold((Vec::new(), Vec::new()), |(mut posting_ids, mut candidate_ids), target| {
            match target {
                ListingTarget::Posting(id) => posting_ids.push(*id),
                ListingTarget::Candidate(id) => candidate_ids.push(*id),
            }
            (posting_ids, candidate_ids)
        })
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn insert_posting(&self, posting: &Posting) -> Result<(), ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(postings::table)
            .values(NewPostingRow::from(posting))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn insert_candidate(
        &self,
        candidate: &CandidateProfile,
    ) -> Result<(), ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(candidates::table)
            .values(NewCandidateRow::from(candidate))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find(&self, target: ListingTarget) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match target {
            ListingTarget::Posting(id) => {
                let row = postings::table
                    .find(id)
                    .select(PostingRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(|row| {
                    Posting::try_from(row)
                        .map(Listing::Posting)
                        .map_err(ListingRepositoryError::corrupt)
                })
                .transpose()
            }
            ListingTarget::Candidate(id) => {
                let row = candidates::table
                    .find(id)
                    .select(CandidateRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(|row| {
                    CandidateProfile::try_from(row)
                        .map(Listing::Candidate)
                        .map_err(ListingRepositoryError::corrupt)
                })
                .transpose()
            }
        }
    }

    async fn find_many(
        &self,
        targets: &[ListingTarget],
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let (posting_ids, candidate_ids) = split_targets(targets);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut listings = Vec::with_capacity(targets.len());

        if !posting_ids.is_empty() {
            let rows: Vec<PostingRow> = postings::table
                .filter(postings::id.eq_any(posting_ids))
                .select(PostingRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            listings.extend(postings_to_listings(rows)?);
        }
        if !candidate_ids.is_empty() {
            let rows: Vec<CandidateRow> = candidates::table
                .filter(candidates::id.eq_any(candidate_ids))
                .select(CandidateRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            listings.extend(candidates_to_listings(rows)?);
        }
        Ok(listings)
    }

    async fn list_open(
        &self,
        kind: ListingKind,
        now: DateTime<Utc>,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let active = ListingStatus::Active.as_str();
        match kind {
            ListingKind::Posting => {
                let rows = postings::table
                    .filter(postings::status.eq(active))
                    .filter(postings::expires_at.ge(now))
                    .order(postings::created_at.desc())
                    .select(PostingRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                postings_to_listings(rows)
            }
            ListingKind::Candidate => {
                let rows = candidates::table
                    .filter(candidates::status.eq(active))
                    .filter(candidates::expires_at.ge(now))
                    .order(candidates::created_at.desc())
                    .select(CandidateRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                candidates_to_listings(rows)
            }
        }
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_id = *owner.as_uuid();
        match kind {
            ListingKind::Posting => {
                let rows = postings::table
                    .filter(postings::owner_id.eq(owner_id))
                    .order(postings::created_at.desc())
                    .select(PostingRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                postings_to_listings(rows)
            }
            ListingKind::Candidate => {
                let rows = candidates::table
                    .filter(candidates::owner_id.eq(owner_id))
                    .order(candidates::created_at.desc())
                    .select(CandidateRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                candidates_to_listings(rows)
            }
        }
    }

    async fn list_all(&self, kind: ListingKind) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match kind {
            ListingKind::Posting => {
                let rows = postings::table
                    .order(postings::created_at.desc())
                    .select(PostingRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                postings_to_listings(rows)
            }
            ListingKind::Candidate => {
                let rows = candidates::table
                    .order(candidates::created_at.desc())
                    .select(CandidateRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                candidates_to_listings(rows)
            }
        }
    }

    async fn update_lifecycle(
        &self,
        target: ListingTarget,
        lifecycle: &Lifecycle,
    ) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = match target {
            ListingTarget::Posting(id) => {
                diesel::update(postings::table.find(id))
                    .set(PostingLifecycleUpdate::from(lifecycle))
                    .execute(&mut conn)
                    .await
            }
            ListingTarget::Candidate(id) => {
                diesel::update(candidates::table.find(id))
                    .set(CandidateLifecycleUpdate::from(lifecycle))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, target: ListingTarget) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = match target {
            ListingTarget::Posting(id) => {
                diesel::delete(postings::table.find(id))
                    .execute(&mut conn)
                    .await
            }
            ListingTarget::Candidate(id) => {
                diesel::delete(candidates::table.find(id))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
