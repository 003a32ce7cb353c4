//! Bookmark ledger service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use super::listing_service::not_found;
use crate::domain::ports::{
    BookmarkCommand, BookmarkQuery, BookmarkRepository, BookmarkRepositoryError,
    ListingRepository,
};
use crate::domain::repository_errors::{map_bookmark_error, map_listing_error};
use crate::domain::{
    BookmarkRecord, BookmarkToggle, Error, Listing, ListingKind, ListingTarget, ResolvedBookmark,
    UserId,
};

/// Bookmark service implementing [`BookmarkCommand`] and [`BookmarkQuery`].
#[derive(Clone)]
pub struct BookmarkService<B, L> {
    bookmarks: Arc<B>,
    listings: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<B, L> BookmarkService<B, L> {
    /// Create a new service.
    pub fn new(bookmarks: Arc<B>, listings: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookmarks,
            listings,
            clock,
        }
    }
}

#[async_trait]
impl<B, L> BookmarkCommand for BookmarkService<B, L>
where
    B: BookmarkRepository,
    L: ListingRepository,
{
    async fn toggle(&self, user: &UserId, target: ListingTarget) -> Result<BookmarkToggle, Error> {
        if let Some(existing) = self
            .bookmarks
            .find(user, target)
            .await
            .map_err(map_bookmark_error)?
        {
            self.bookmarks
                .delete(existing.id)
                .await
                .map_err(map_bookmark_error)?;
            return Ok(BookmarkToggle::Removed);
        }

        if self
            .listings
            .find(target)
            .await
            .map_err(map_listing_error)?
            .is_none()
        {
            return Err(not_found(target));
        }
        let bookmark = BookmarkRecord {
            id: Uuid::new_v4(),
            user: user.clone(),
            target,
            created_at: self.clock.utc(),
        };
        match self.bookmarks.insert(&bookmark).await {
            Ok(()) => Ok(BookmarkToggle::Added { bookmark }),
            // A concurrent toggle won the insert; report the state that now holds.
            Err(BookmarkRepositoryError::Duplicate { .. }) => {
                let current = self
                    .bookmarks
                    .find(user, target)
                    .await
                    .map_err(map_bookmark_error)?;
                current.map_or_else(
                    || Err(Error::conflict("bookmark changed concurrently")),
                    |bookmark| Ok(BookmarkToggle::Added { bookmark }),
                )
            }
            Err(error) => Err(map_bookmark_error(error)),
        }
    }
}

#[async_trait]
impl<B, L> BookmarkQuery for BookmarkService<B, L>
where
    B: BookmarkRepository,
    L: ListingRepository,
{
    async fn list_mine(
        &self,
        user: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ResolvedBookmark>, Error> {
        let bookmarks = self
            .bookmarks
            .list_by_user(user, kind)
            .await
            .map_err(map_bookmark_error)?;
        let targets: Vec<ListingTarget> = bookmarks.iter().map(|b| b.target).collect();
        let listings: HashMap<ListingTarget, Listing> = self
            .listings
            .find_many(&targets)
            .await
            .map_err(map_listing_error)?
            .into_iter()
            .map(|listing| (listing.target(), listing))
            .collect();
        Ok(bookmarks
            .into_iter()
            .map(|bookmark| {
                let listing = listings.get(&bookmark.target).cloned();
                ResolvedBookmark { bookmark, listing }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockBookmarkRepository, MockListingRepository};
    use crate::domain::{Posting, PostingDraft};
    use crate::test_support::MutableClock;
    use chrono::Utc;
    use rstest::rstest;

    fn service(
        bookmarks: MockBookmarkRepository,
        listings: MockListingRepository,
    ) -> BookmarkService<MockBookmarkRepository, MockListingRepository> {
        BookmarkService::new(
            Arc::new(bookmarks),
            Arc::new(listings),
            Arc::new(MutableClock::new(Utc::now())),
        )
    }

    fn posting() -> Posting {
        Posting::publish(
            Uuid::new_v4(),
            UserId::random(),
            PostingDraft {
                title: "Prenatal yoga lead".to_owned(),
                location: "Suwon".to_owned(),
                category: "Prenatal".to_owned(),
                ..PostingDraft::default()
            },
            Utc::now(),
        )
        .expect("valid posting")
    }

    #[rstest]
    #[tokio::test]
    async fn toggle_adds_when_absent() {
        let posting = posting();
        let target = ListingTarget::Posting(posting.id);
        let mut bookmarks = MockBookmarkRepository::new();
        bookmarks.expect_find().times(1).return_once(|_, _| Ok(None));
        bookmarks.expect_insert().times(1).return_once(|_| Ok(()));
        let mut listings = MockListingRepository::new();
        listings
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(Listing::Posting(posting))));

        let outcome = service(bookmarks, listings)
            .toggle(&UserId::random(), target)
            .await
            .expect("toggle");
        assert!(outcome.is_bookmarked());
    }

    #[rstest]
    #[tokio::test]
    async fn toggle_removes_when_present() {
        let user = UserId::random();
        let target = ListingTarget::Candidate(Uuid::new_v4());
        let existing = BookmarkRecord {
            id: Uuid::new_v4(),
            user: user.clone(),
            target,
            created_at: Utc::now(),
        };
        let existing_id = existing.id;
        let mut bookmarks = MockBookmarkRepository::new();
        bookmarks
            .expect_find()
            .times(1)
            .return_once(move |_, _| Ok(Some(existing)));
        bookmarks
            .expect_delete()
            .withf(move |id| *id == existing_id)
            .times(1)
            .return_once(|_| Ok(true));

        let outcome = service(bookmarks, MockListingRepository::new())
            .toggle(&user, target)
            .await
            .expect("toggle");
        assert_eq!(outcome, BookmarkToggle::Removed);
    }

    #[rstest]
    #[tokio::test]
    async fn toggle_on_missing_listing_is_not_found() {
        let mut bookmarks = MockBookmarkRepository::new();
        bookmarks.expect_find().times(1).return_once(|_, _| Ok(None));
        let mut listings = MockListingRepository::new();
        listings.expect_find().times(1).return_once(|_| Ok(None));

        let error = service(bookmarks, listings)
            .toggle(&UserId::random(), ListingTarget::Posting(Uuid::new_v4()))
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn list_mine_keeps_bookmarks_of_deleted_listings() {
        let user = UserId::random();
        let bookmark = BookmarkRecord {
            id: Uuid::new_v4(),
            user: user.clone(),
            target: ListingTarget::Posting(Uuid::new_v4()),
            created_at: Utc::now(),
        };
        let mut bookmarks = MockBookmarkRepository::new();
        bookmarks
            .expect_list_by_user()
            .times(1)
            .return_once(move |_, _| Ok(vec![bookmark]));
        let mut listings = MockListingRepository::new();
        listings
            .expect_find_many()
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let resolved = service(bookmarks, listings)
            .list_mine(&user, ListingKind::Posting)
            .await
            .expect("list");
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].listing.is_none());
    }
}
