//! Translation of driven-port failures into API errors.
//!
//! Connection failures surface as `service_unavailable`, query failures and
//! corrupt rows as `internal`, uniqueness violations as `conflict` carrying a
//! machine-readable `code` detail.

use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{
    AccountRepositoryError, BookmarkRepositoryError, InterestRepositoryError,
    ListingRepositoryError, NotificationRepositoryError, UserProfileRepositoryError,
};

fn conflict(message: impl Into<String>, code: &str) -> Error {
    Error::conflict(message).with_details(json!({ "code": code }))
}

pub(crate) fn map_listing_error(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
        ListingRepositoryError::Corrupt { message } => {
            Error::internal(format!("listing data invalid: {message}"))
        }
    }
}

pub(crate) fn map_interest_error(error: InterestRepositoryError) -> Error {
    match error {
        InterestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("interest repository unavailable: {message}"))
        }
        InterestRepositoryError::Query { message } => {
            Error::internal(format!("interest repository error: {message}"))
        }
        InterestRepositoryError::Duplicate { .. } => {
            conflict("you have already responded to this listing", "already_acted")
        }
        InterestRepositoryError::Corrupt { message } => {
            Error::internal(format!("interest data invalid: {message}"))
        }
    }
}

pub(crate) fn map_bookmark_error(error: BookmarkRepositoryError) -> Error {
    match error {
        BookmarkRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("bookmark repository unavailable: {message}"))
        }
        BookmarkRepositoryError::Query { message } => {
            Error::internal(format!("bookmark repository error: {message}"))
        }
        BookmarkRepositoryError::Duplicate { .. } => {
            conflict("listing is already bookmarked", "already_bookmarked")
        }
        BookmarkRepositoryError::Corrupt { message } => {
            Error::internal(format!("bookmark data invalid: {message}"))
        }
    }
}

pub(crate) fn map_notification_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
        NotificationRepositoryError::Corrupt { message } => {
            Error::internal(format!("notification data invalid: {message}"))
        }
    }
}

pub(crate) fn map_profile_error(error: UserProfileRepositoryError) -> Error {
    match error {
        UserProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        UserProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
        UserProfileRepositoryError::Duplicate { .. } => {
            conflict("profile already exists", "profile_exists")
        }
        UserProfileRepositoryError::Corrupt { message } => {
            Error::internal(format!("profile data invalid: {message}"))
        }
    }
}

pub(crate) fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::Duplicate { .. } => {
            conflict("an account with this email already exists", "email_taken")
        }
    }
}
