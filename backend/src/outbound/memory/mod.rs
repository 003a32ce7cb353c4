//! Process-local store implementing every repository port.
//!
//! Backs the server when no database URL is configured and drives the HTTP
//! scenario tests. Uniqueness rules mirror the PostgreSQL indexes: one
//! interest per actor and target, one bookmark per user and target, one
//! account per email and one run per seed key. Lists are returned newest
//! first. Deleting a listing leaves interests and bookmarks pointing at it in
//! place, as the database does.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    Account, AccountRepository, AccountRepositoryError, BookmarkRepository,
    BookmarkRepositoryError, ExampleDataSeedRepository, ExampleDataSeedRepositoryError,
    ExampleDataSeedRequest, InterestRepository, InterestRepositoryError, ListingRepository,
    ListingRepositoryError, NotificationRepository, NotificationRepositoryError, SeedingResult,
    UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{
    BookmarkRecord, CandidateProfile, InterestRecord, Lifecycle, Listing, ListingKind,
    ListingTarget, Notification, PasswordDigest, Posting, Role, UserId, UserProfile,
};

#[derive(Default)]
struct Tables {
    postings: HashMap<Uuid, Posting>,
    candidates: HashMap<Uuid, CandidateProfile>,
    interests: Vec<InterestRecord>,
    bookmarks: Vec<BookmarkRecord>,
    notifications: Vec<Notification>,
    profiles: HashMap<UserId, UserProfile>,
    accounts: HashMap<String, Account>,
    seed_runs: HashSet<String>,
}

impl Tables {
    fn listing(&self, target: ListingTarget) -> Option<Listing> {
        match target {
            ListingTarget::Posting(id) => self.postings.get(&id).cloned().map(Listing::Posting),
            ListingTarget::Candidate(id) => {
                self.candidates.get(&id).cloned().map(Listing::Candidate)
            }
        }
    }

    fn listings(&self, kind: ListingKind) -> Vec<Listing> {
        let mut listings: Vec<Listing> = match kind {
            ListingKind::Posting => self.postings.values().cloned().map(Listing::Posting).collect(),
            ListingKind::Candidate => self
                .candidates
                .values()
                .cloned()
                .map(Listing::Candidate)
                .collect(),
        };
        listings.sort_by(|a, b| b.lifecycle().created_at().cmp(&a.lifecycle().created_at()));
        listings
    }
}

fn newest_first<T>(mut records: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    records.sort_by_key(|record| std::cmp::Reverse(created_at(record)));
    records
}

/// Shared in-memory tables guarded by one mutex.
///
/// No lock is held across an await point, so a plain `std` mutex suffices.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn insert_posting(&self, posting: &Posting) -> Result<(), ListingRepositoryError> {
        self.tables().postings.insert(posting.id, posting.clone());
        Ok(())
    }

    async fn insert_candidate(
        &self,
        candidate: &CandidateProfile,
    ) -> Result<(), ListingRepositoryError> {
        self.tables()
            .candidates
            .insert(candidate.id, candidate.clone());
        Ok(())
    }

    async fn find(&self, target: ListingTarget) -> Result<Option<Listing>, ListingRepositoryError> {
        Ok(self.tables().listing(target))
    }

    async fn find_many(
        &self,
        targets: &[ListingTarget],
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let tables = self.tables();
        Ok(targets
            .iter()
            .filter_map(|target| tables.listing(*target))
            .collect())
    }

    async fn list_open(
        &self,
        kind: ListingKind,
        now: DateTime<Utc>,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self
            .tables()
            .listings(kind)
            .into_iter()
            .filter(|listing| listing.lifecycle().is_open(now))
            .collect())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self
            .tables()
            .listings(kind)
            .into_iter()
            .filter(|listing| listing.owner() == owner)
            .collect())
    }

    async fn list_all(&self, kind: ListingKind) -> Result<Vec<Listing>, ListingRepositoryError> {
        Ok(self.tables().listings(kind))
    }

    async fn update_lifecycle(
        &self,
        target: ListingTarget,
        lifecycle: &Lifecycle,
    ) -> Result<bool, ListingRepositoryError> {
        let mut tables = self.tables();
        let slot = match target {
            ListingTarget::Posting(id) => tables
                .postings
                .get_mut(&id)
                .map(|posting| &mut posting.lifecycle),
            ListingTarget::Candidate(id) => tables
                .candidates
                .get_mut(&id)
                .map(|candidate| &mut candidate.lifecycle),
        };
        Ok(slot.map(|current| *current = lifecycle.clone()).is_some())
    }

    async fn delete(&self, target: ListingTarget) -> Result<bool, ListingRepositoryError> {
        let mut tables = self.tables();
        Ok(match target {
            ListingTarget::Posting(id) => tables.postings.remove(&id).is_some(),
            ListingTarget::Candidate(id) => tables.candidates.remove(&id).is_some(),
        })
    }
}

#[async_trait]
impl InterestRepository for MemoryStore {
    async fn insert(&self, record: &InterestRecord) -> Result<(), InterestRepositoryError> {
        let mut tables = self.tables();
        let taken = tables
            .interests
            .iter()
            .any(|existing| existing.actor == record.actor && existing.target == record.target);
        if taken {
            return Err(InterestRepositoryError::duplicate(format!(
                "{} already acted on {}",
                record.actor,
                record.target.id()
            )));
        }
        tables.interests.push(record.clone());
        Ok(())
    }

    async fn exists(
        &self,
        actor: &UserId,
        target: ListingTarget,
    ) -> Result<bool, InterestRepositoryError> {
        Ok(self
            .tables()
            .interests
            .iter()
            .any(|record| &record.actor == actor && record.target == target))
    }

    async fn count_for(&self, target: ListingTarget) -> Result<u64, InterestRepositoryError> {
        let count = self
            .tables()
            .interests
            .iter()
            .filter(|record| record.target == target)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn list_by_actor(
        &self,
        actor: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<InterestRecord>, InterestRepositoryError> {
        let records = self
            .tables()
            .interests
            .iter()
            .filter(|record| &record.actor == actor && record.target.kind() == kind)
            .cloned()
            .collect();
        Ok(newest_first(records, |record| record.created_at))
    }

    async fn list_for_targets(
        &self,
        targets: &[ListingTarget],
    ) -> Result<Vec<InterestRecord>, InterestRepositoryError> {
        let records = self
            .tables()
            .interests
            .iter()
            .filter(|record| targets.contains(&record.target))
            .cloned()
            .collect();
        Ok(newest_first(records, |record| record.created_at))
    }
}

#[async_trait]
impl BookmarkRepository for MemoryStore {
    async fn find(
        &self,
        user: &UserId,
        target: ListingTarget,
    ) -> Result<Option<BookmarkRecord>, BookmarkRepositoryError> {
        Ok(self
            .tables()
            .bookmarks
            .iter()
            .find(|record| &record.user == user && record.target == target)
            .cloned())
    }

    async fn insert(&self, record: &BookmarkRecord) -> Result<(), BookmarkRepositoryError> {
        let mut tables = self.tables();
        let taken = tables
            .bookmarks
            .iter()
            .any(|existing| existing.user == record.user && existing.target == record.target);
        if taken {
            return Err(BookmarkRepositoryError::duplicate(format!(
                "{} already bookmarked {}",
                record.user,
                record.target.id()
            )));
        }
        tables.bookmarks.push(record.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BookmarkRepositoryError> {
        let mut tables = self.tables();
        let before = tables.bookmarks.len();
        tables.bookmarks.retain(|record| record.id != id);
        Ok(tables.bookmarks.len() < before)
    }

    async fn list_by_user(
        &self,
        user: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<BookmarkRecord>, BookmarkRepositoryError> {
        let records = self
            .tables()
            .bookmarks
            .iter()
            .filter(|record| &record.user == user && record.target.kind() == kind)
            .cloned()
            .collect();
        Ok(newest_first(records, |record| record.created_at))
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        self.tables().notifications.push(notification.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        recipient: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let records = self
            .tables()
            .notifications
            .iter()
            .filter(|notification| &notification.recipient == recipient)
            .cloned()
            .collect();
        let mut records = newest_first(records, |notification| notification.created_at);
        records.truncate(limit);
        Ok(records)
    }

    async fn mark_read(
        &self,
        recipient: &UserId,
        id: Uuid,
    ) -> Result<bool, NotificationRepositoryError> {
        let mut tables = self.tables();
        let found = tables
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id && &notification.recipient == recipient);
        Ok(found.map(|notification| notification.read = true).is_some())
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError> {
        let mut tables = self.tables();
        let mut updated = 0_u64;
        for notification in tables
            .notifications
            .iter_mut()
            .filter(|notification| &notification.recipient == recipient && !notification.read)
        {
            notification.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl UserProfileRepository for MemoryStore {
    async fn find(&self, id: &UserId) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        Ok(self.tables().profiles.get(id).cloned())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut tables = self.tables();
        if tables.profiles.contains_key(&profile.id) {
            return Err(UserProfileRepositoryError::duplicate(profile.id.to_string()));
        }
        tables.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> Result<bool, UserProfileRepositoryError> {
        let mut tables = self.tables();
        let slot = tables.profiles.get_mut(&profile.id);
        Ok(slot.map(|current| *current = profile.clone()).is_some())
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        let profiles = self.tables().profiles.values().cloned().collect();
        Ok(newest_first(profiles, |profile| profile.created_at))
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<bool, UserProfileRepositoryError> {
        let mut tables = self.tables();
        let slot = tables.profiles.get_mut(id);
        Ok(slot.map(|profile| profile.role = role).is_some())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserProfileRepositoryError> {
        Ok(self.tables().profiles.remove(id).is_some())
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.tables().accounts.get(email).cloned())
    }

    async fn create(
        &self,
        account: &Account,
        profile: &UserProfile,
    ) -> Result<(), AccountRepositoryError> {
        let mut tables = self.tables();
        if tables.accounts.contains_key(&account.email) {
            return Err(AccountRepositoryError::duplicate(account.email.clone()));
        }
        tables.accounts.insert(account.email.clone(), account.clone());
        tables.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update_digest(
        &self,
        id: &UserId,
        digest: &PasswordDigest,
    ) -> Result<bool, AccountRepositoryError> {
        let mut tables = self.tables();
        let Some(account) = tables.accounts.values_mut().find(|a| &a.id == id) else {
            return Ok(false);
        };
        account.digest = digest.clone();
        Ok(true)
    }
}

#[async_trait]
impl ExampleDataSeedRepository for MemoryStore {
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError> {
        let mut tables = self.tables();
        if !tables.seed_runs.insert(request.seed_key) {
            return Ok(SeedingResult::AlreadySeeded);
        }
        for posting in request.postings {
            tables.postings.insert(posting.id, posting);
        }
        Ok(SeedingResult::Applied)
    }
}
