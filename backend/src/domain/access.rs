//! Authorisation checks applied inside domain services.

use crate::domain::ports::UserProfileRepository;
use crate::domain::repository_errors::map_profile_error;
use crate::domain::{Error, Listing, UserId};

/// Whether `actor` holds the admin role. A missing profile is not admin.
pub(crate) async fn is_admin<P>(profiles: &P, actor: &UserId) -> Result<bool, Error>
where
    P: UserProfileRepository + ?Sized,
{
    let profile = profiles.find(actor).await.map_err(map_profile_error)?;
    Ok(profile.is_some_and(|p| p.role.is_admin()))
}

/// Fail with `forbidden` unless `actor` is an admin.
pub(crate) async fn require_admin<P>(profiles: &P, actor: &UserId) -> Result<(), Error>
where
    P: UserProfileRepository + ?Sized,
{
    if is_admin(profiles, actor).await? {
        Ok(())
    } else {
        Err(Error::forbidden("admin role required"))
    }
}

/// Fail with `forbidden` unless `actor` owns `listing` or is an admin.
pub(crate) async fn require_owner_or_admin<P>(
    profiles: &P,
    actor: &UserId,
    listing: &Listing,
) -> Result<(), Error>
where
    P: UserProfileRepository + ?Sized,
{
    if listing.owner() == actor || is_admin(profiles, actor).await? {
        Ok(())
    } else {
        Err(Error::forbidden("only the owner can change this listing"))
    }
}
