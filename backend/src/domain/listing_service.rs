//! Listing domain service: publication, browsing and lifecycle transitions.
//!
//! Every transition reads the listing, checks that the caller owns it (or is
//! an admin), applies the pure [`Lifecycle`] transition and persists it in a
//! single update. The fresh state is returned so callers never show a stale
//! badge after a successful mutation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::access::require_owner_or_admin;
use crate::domain::ports::{
    InterestRepository, ListingCommand, ListingDetail, ListingQuery, ListingRepository,
    ListingView, UserProfileRepository,
};
use crate::domain::repository_errors::{map_interest_error, map_listing_error};
use crate::domain::{
    CandidateDraft, CandidateProfile, Error, ExtensionDays, Lifecycle, Listing, ListingFilter,
    ListingKind, ListingTarget, ListingValidationError, Posting, PostingDraft, UserId,
};

/// Listing service implementing [`ListingCommand`] and [`ListingQuery`].
#[derive(Clone)]
pub struct ListingService<L, I, P> {
    listings: Arc<L>,
    interests: Arc<I>,
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<L, I, P> ListingService<L, I, P> {
    /// Create a new service with the given repositories and clock.
    pub fn new(listings: Arc<L>, interests: Arc<I>, profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listings,
            interests,
            profiles,
            clock,
        }
    }
}

pub(crate) fn validation_error(error: ListingValidationError) -> Error {
    let field = match &error {
        ListingValidationError::MissingField { field } => *field,
        ListingValidationError::NoStyles => "styles",
        ListingValidationError::ExtensionOutOfRange { .. } => "days",
        ListingValidationError::UnknownKind => "kind",
        ListingValidationError::UnknownStatus { .. }
        | ListingValidationError::InconsistentClosedAt => "status",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_listing",
    }))
}

pub(crate) fn not_found(target: ListingTarget) -> Error {
    Error::not_found(format!("{} {} not found", target.kind(), target.id()))
}

impl<L, I, P> ListingService<L, I, P>
where
    L: ListingRepository,
    I: InterestRepository,
    P: UserProfileRepository,
{
    fn view(&self, listing: Listing) -> ListingView {
        let badge = listing.lifecycle().badge(self.clock.utc());
        ListingView { listing, badge }
    }

    async fn load(&self, target: ListingTarget) -> Result<Listing, Error> {
        self.listings
            .find(target)
            .await
            .map_err(map_listing_error)?
            .ok_or_else(|| not_found(target))
    }

    async fn transition(
        &self,
        actor: &UserId,
        target: ListingTarget,
        apply: impl FnOnce(&Lifecycle) -> Lifecycle + Send,
    ) -> Result<ListingView, Error> {
        let listing = self.load(target).await?;
        require_owner_or_admin(self.profiles.as_ref(), actor, &listing).await?;

        let lifecycle = apply(listing.lifecycle());
        let updated = self
            .listings
            .update_lifecycle(target, &lifecycle)
            .await
            .map_err(map_listing_error)?;
        if !updated {
            return Err(not_found(target));
        }
        info!(
            kind = %target.kind(),
            listing_id = %target.id(),
            status = %lifecycle.status(),
            "listing lifecycle updated"
        );
        Ok(self.view(listing.with_lifecycle(lifecycle)))
    }
}

#[async_trait]
impl<L, I, P> ListingCommand for ListingService<L, I, P>
where
    L: ListingRepository,
    I: InterestRepository,
    P: UserProfileRepository,
{
    async fn create_posting(
        &self,
        owner: &UserId,
        draft: PostingDraft,
    ) -> Result<ListingView, Error> {
        let posting = Posting::publish(Uuid::new_v4(), owner.clone(), draft, self.clock.utc())
            .map_err(validation_error)?;
        self.listings
            .insert_posting(&posting)
            .await
            .map_err(map_listing_error)?;
        Ok(self.view(Listing::Posting(posting)))
    }

    async fn create_candidate(
        &self,
        owner: &UserId,
        draft: CandidateDraft,
    ) -> Result<ListingView, Error> {
        let candidate =
            CandidateProfile::publish(Uuid::new_v4(), owner.clone(), draft, self.clock.utc())
                .map_err(validation_error)?;
        self.listings
            .insert_candidate(&candidate)
            .await
            .map_err(map_listing_error)?;
        Ok(self.view(Listing::Candidate(candidate)))
    }

    async fn close(&self, actor: &UserId, target: ListingTarget) -> Result<ListingView, Error> {
        let now = self.clock.utc();
        self.transition(actor, target, |lifecycle| lifecycle.close(now))
            .await
    }

    async fn reopen(&self, actor: &UserId, target: ListingTarget) -> Result<ListingView, Error> {
        let now = self.clock.utc();
        self.transition(actor, target, |lifecycle| lifecycle.reopen(now))
            .await
    }

    async fn extend(
        &self,
        actor: &UserId,
        target: ListingTarget,
        days: ExtensionDays,
    ) -> Result<ListingView, Error> {
        let now = self.clock.utc();
        self.transition(actor, target, |lifecycle| lifecycle.extend(now, days))
            .await
    }

    async fn delete(&self, actor: &UserId, target: ListingTarget) -> Result<(), Error> {
        let listing = self.load(target).await?;
        require_owner_or_admin(self.profiles.as_ref(), actor, &listing).await?;
        let deleted = self
            .listings
            .delete(target)
            .await
            .map_err(map_listing_error)?;
        if !deleted {
            return Err(not_found(target));
        }
        info!(kind = %target.kind(), listing_id = %target.id(), "listing deleted");
        Ok(())
    }
}

#[async_trait]
impl<L, I, P> ListingQuery for ListingService<L, I, P>
where
    L: ListingRepository,
    I: InterestRepository,
    P: UserProfileRepository,
{
    async fn get(&self, target: ListingTarget) -> Result<ListingDetail, Error> {
        let listing = self.load(target).await?;
        let interest_count = self
            .interests
            .count_for(target)
            .await
            .map_err(map_interest_error)?;
        let ListingView { listing, badge } = self.view(listing);
        Ok(ListingDetail {
            listing,
            badge,
            interest_count,
        })
    }

    async fn list_open(
        &self,
        kind: ListingKind,
        filter: ListingFilter,
    ) -> Result<Vec<ListingView>, Error> {
        let listings = self
            .listings
            .list_open(kind, self.clock.utc())
            .await
            .map_err(map_listing_error)?;
        Ok(listings
            .into_iter()
            .filter(|listing| filter.matches(listing))
            .map(|l| self.view(l))
            .collect())
    }

    async fn list_owned(
        &self,
        owner: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ListingView>, Error> {
        let listings = self
            .listings
            .list_by_owner(owner, kind)
            .await
            .map_err(map_listing_error)?;
        Ok(listings.into_iter().map(|l| self.view(l)).collect())
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
