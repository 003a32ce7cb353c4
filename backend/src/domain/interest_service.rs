//! Application/contact ledger service.
//!
//! `apply` and `contact` check the target exists, refuse interest in one's
//! own listing, fast-path duplicates with a presence lookup and rely on the
//! store's unique index for the race the lookup cannot close. The listing
//! owner is notified afterwards on a best-effort basis.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::listing_service::not_found;
use super::notification_service::NotificationService;
use crate::domain::ports::{
    InterestCommand, InterestQuery, InterestRepository, ListingRepository, NotificationRepository,
};
use crate::domain::repository_errors::{map_interest_error, map_listing_error};
use crate::domain::{
    Error, InterestRecord, Listing, ListingKind, ListingTarget, NewNotification,
    ResolvedInterest, UserId, normalise_message,
};

/// Interest service implementing [`InterestCommand`] and [`InterestQuery`].
#[derive(Clone)]
pub struct InterestService<I, L, N> {
    interests: Arc<I>,
    listings: Arc<L>,
    notifications: NotificationService<N>,
    clock: Arc<dyn Clock>,
}

impl<I, L, N> InterestService<I, L, N> {
    /// Create a new service.
    pub fn new(
        interests: Arc<I>,
        listings: Arc<L>,
        notifications: NotificationService<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            interests,
            listings,
            notifications,
            clock,
        }
    }
}

fn already_acted() -> Error {
    Error::conflict("you have already responded to this listing")
        .with_details(json!({ "code": "already_acted" }))
}

fn notification_for(listing: &Listing, record: &InterestRecord) -> NewNotification {
    match listing {
        Listing::Posting(posting) => {
            NewNotification::application_received(posting.owner.clone(), record.id, &posting.title)
        }
        Listing::Candidate(candidate) => NewNotification::contact_received(
            candidate.owner.clone(),
            record.id,
            &candidate.name,
        ),
    }
}

impl<I, L, N> InterestService<I, L, N>
where
    I: InterestRepository,
    L: ListingRepository,
    N: NotificationRepository,
{
    async fn record(
        &self,
        actor: &UserId,
        target: ListingTarget,
        message: Option<String>,
    ) -> Result<InterestRecord, Error> {
        let message = normalise_message(message).map_err(|length| {
            Error::invalid_request(format!("message is too long ({length} characters)"))
                .with_details(json!({ "field": "message", "code": "too_long" }))
        })?;
        let listing = self
            .listings
            .find(target)
            .await
            .map_err(map_listing_error)?
            .ok_or_else(|| not_found(target))?;
        if listing.owner() == actor {
            return Err(Error::invalid_request("you cannot respond to your own listing")
                .with_details(json!({ "code": "own_listing" })));
        }
        if self
            .interests
            .exists(actor, target)
            .await
            .map_err(map_interest_error)?
        {
            return Err(already_acted());
        }

        let record = InterestRecord {
            id: Uuid::new_v4(),
            actor: actor.clone(),
            target,
            message,
            created_at: self.clock.utc(),
        };
        self.interests
            .insert(&record)
            .await
            .map_err(map_interest_error)?;
        info!(
            kind = %record.kind(),
            listing_id = %target.id(),
            "interest recorded"
        );

        self.notifications
            .notify(notification_for(&listing, &record))
            .await;
        Ok(record)
    }

    async fn resolve(&self, records: Vec<InterestRecord>) -> Result<Vec<ResolvedInterest>, Error> {
        let targets: Vec<ListingTarget> = records.iter().map(|r| r.target).collect();
        let listings: HashMap<ListingTarget, Listing> = self
            .listings
            .find_many(&targets)
            .await
            .map_err(map_listing_error)?
            .into_iter()
            .map(|listing| (listing.target(), listing))
            .collect();
        Ok(records
            .into_iter()
            .map(|record| {
                let listing = listings.get(&record.target).cloned();
                ResolvedInterest { record, listing }
            })
            .collect())
    }
}

#[async_trait]
impl<I, L, N> InterestCommand for InterestService<I, L, N>
where
    I: InterestRepository,
    L: ListingRepository,
    N: NotificationRepository,
{
    async fn apply(
        &self,
        actor: &UserId,
        posting_id: Uuid,
        message: Option<String>,
    ) -> Result<InterestRecord, Error> {
        self.record(actor, ListingTarget::Posting(posting_id), message)
            .await
    }

    async fn contact(
        &self,
        actor: &UserId,
        candidate_id: Uuid,
        message: Option<String>,
    ) -> Result<InterestRecord, Error> {
        self.record(actor, ListingTarget::Candidate(candidate_id), message)
            .await
    }
}

#[async_trait]
impl<I, L, N> InterestQuery for InterestService<I, L, N>
where
    I: InterestRepository,
    L: ListingRepository,
    N: NotificationRepository,
{
    async fn has_acted(&self, actor: &UserId, target: ListingTarget) -> Result<bool, Error> {
        self.interests
            .exists(actor, target)
            .await
            .map_err(map_interest_error)
    }

    async fn count_for(&self, target: ListingTarget) -> Result<u64, Error> {
        self.interests
            .count_for(target)
            .await
            .map_err(map_interest_error)
    }

    async fn list_mine(
        &self,
        actor: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ResolvedInterest>, Error> {
        let records = self
            .interests
            .list_by_actor(actor, kind)
            .await
            .map_err(map_interest_error)?;
        self.resolve(records).await
    }

    async fn list_received(
        &self,
        owner: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ResolvedInterest>, Error> {
        let owned: Vec<ListingTarget> = self
            .listings
            .list_by_owner(owner, kind)
            .await
            .map_err(map_listing_error)?
            .iter()
            .map(Listing::target)
            .collect();
        if owned.is_empty() {
            return Ok(Vec::new());
        }
        let records = self
            .interests
            .list_for_targets(&owned)
            .await
            .map_err(map_interest_error)?;
        self.resolve(records).await
    }
}

#[cfg(test)]
#[path = "interest_service_tests.rs"]
mod tests;
