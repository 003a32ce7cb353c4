//! Moderation service. Each operation checks the caller's role first.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::listing_service::not_found;
use crate::domain::access::require_admin;
use crate::domain::ports::{AdminCommand, ListingRepository, ListingView, UserProfileRepository};
use crate::domain::repository_errors::{map_listing_error, map_profile_error};
use crate::domain::{Error, ListingKind, ListingTarget, UserId, UserProfile};

/// Admin service implementing [`AdminCommand`].
#[derive(Clone)]
pub struct AdminService<L, P> {
    listings: Arc<L>,
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<L, P> AdminService<L, P> {
    /// Create a new service.
    pub fn new(listings: Arc<L>, profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listings,
            profiles,
            clock,
        }
    }
}

fn profile_not_found(user: &UserId) -> Error {
    Error::not_found(format!("profile {user} not found"))
}

#[async_trait]
impl<L, P> AdminCommand for AdminService<L, P>
where
    L: ListingRepository,
    P: UserProfileRepository,
{
    async fn list_listings(
        &self,
        admin: &UserId,
        kind: ListingKind,
    ) -> Result<Vec<ListingView>, Error> {
        require_admin(self.profiles.as_ref(), admin).await?;
        let now = self.clock.utc();
        let listings = self
            .listings
            .list_all(kind)
            .await
            .map_err(map_listing_error)?;
        Ok(listings
            .into_iter()
            .map(|listing| {
                let badge = listing.lifecycle().badge(now);
                ListingView { listing, badge }
            })
            .collect())
    }

    async fn list_profiles(&self, admin: &UserId) -> Result<Vec<UserProfile>, Error> {
        require_admin(self.profiles.as_ref(), admin).await?;
        self.profiles.list_all().await.map_err(map_profile_error)
    }

    async fn delete_listing(&self, admin: &UserId, target: ListingTarget) -> Result<(), Error> {
        require_admin(self.profiles.as_ref(), admin).await?;
        let deleted = self
            .listings
            .delete(target)
            .await
            .map_err(map_listing_error)?;
        if !deleted {
            return Err(not_found(target));
        }
        info!(%admin, kind = %target.kind(), listing_id = %target.id(), "admin deleted listing");
        Ok(())
    }

    async fn toggle_role(&self, admin: &UserId, user: &UserId) -> Result<UserProfile, Error> {
        require_admin(self.profiles.as_ref(), admin).await?;
        let profile = self
            .profiles
            .find(user)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| profile_not_found(user))?;
        let role = profile.role.toggled();
        if !self
            .profiles
            .set_role(user, role)
            .await
            .map_err(map_profile_error)?
        {
            return Err(profile_not_found(user));
        }
        info!(%admin, %user, role = role.as_str(), "role changed");
        Ok(UserProfile { role, ..profile })
    }

    async fn delete_profile(&self, admin: &UserId, user: &UserId) -> Result<(), Error> {
        require_admin(self.profiles.as_ref(), admin).await?;
        if !self
            .profiles
            .delete(user)
            .await
            .map_err(map_profile_error)?
        {
            return Err(profile_not_found(user));
        }
        info!(%admin, %user, "admin deleted profile");
        Ok(())
    }
}
