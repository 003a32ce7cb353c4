//! PostgreSQL-backed `BookmarkRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BookmarkRepository, BookmarkRepositoryError};
use crate::domain::{BookmarkRecord, ListingKind, ListingTarget, UserId};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_unique_diesel_error};
use super::models::BookmarkRow;
use super::pool::{DbPool, PoolError};
use super::schema::bookmarks;

/// Diesel-backed implementation of the `BookmarkRepository` port.
#[derive(Clone)]
pub struct DieselBookmarkRepository {
    pool: DbPool,
}

impl DieselBookmarkRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookmarkRepositoryError {
    map_basic_pool_error(error, BookmarkRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookmarkRepositoryError {
    map_unique_diesel_error(
        error,
        BookmarkRepositoryError::query,
        BookmarkRepositoryError::connection,
        BookmarkRepositoryError::duplicate,
    )
}

fn row_to_record(row: BookmarkRow) -> Result<BookmarkRecord, BookmarkRepositoryError> {
    BookmarkRecord::try_from(row).map_err(BookmarkRepositoryError::corrupt)
}

#[async_trait]
impl BookmarkRepository for DieselBookmarkRepository {
    async fn find(
        &self,
        user: &UserId,
        target: ListingTarget,
    ) -> Result<Option<BookmarkRecord>, BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let by_user = bookmarks::table
            .filter(bookmarks::user_id.eq(*user.as_uuid()))
            .select(BookmarkRow::as_select());
        let row = match target {
            ListingTarget::Posting(id) => {
                by_user
                    .filter(bookmarks::posting_id.eq(id))
                    .first(&mut conn)
                    .await
            }
            ListingTarget::Candidate(id) => {
                by_user
                    .filter(bookmarks::candidate_id.eq(id))
                    .first(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn insert(&self, record: &BookmarkRecord) -> Result<(), BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(bookmarks::table)
            .values(BookmarkRow::from(record))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(bookmarks::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_by_user(
        &self,
        user: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<BookmarkRecord>, BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let by_user = bookmarks::table
            .filter(bookmarks::user_id.eq(*user.as_uuid()))
            .order(bookmarks::created_at.desc())
            .select(BookmarkRow::as_select());
        let rows: Vec<BookmarkRow> = match kind {
            ListingKind::Posting => {
                by_user
                    .filter(bookmarks::posting_id.is_not_null())
                    .load(&mut conn)
                    .await
            }
            ListingKind::Candidate => {
                by_user
                    .filter(bookmarks::candidate_id.is_not_null())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }
}
