//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed job board entities used by the API and
//! persistence layers, together with the services that implement the driving
//! ports. Services depend only on port traits so adapters can be swapped
//! between the Diesel store, the in-memory store and test doubles.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Listing, Lifecycle, Badge: listing aggregate and its derived badge.
//! - InterestRecord, BookmarkRecord, Notification: per-user ledgers.
//! - UserProfile: profile and role of an authenticated user.

pub mod auth;
pub mod bookmark;
pub mod error;
pub mod interest;
pub mod listing;
pub mod notification;
pub mod ports;
pub mod profile;
pub mod trace_id;
pub mod user;

mod access;
mod account_service;
mod admin_service;
mod bookmark_service;
mod drafting_service;
#[cfg(feature = "example-data")]
mod example_data;
mod inbox_poller;
mod interest_service;
mod listing_service;
mod notification_service;
mod profile_service;
mod repository_errors;

pub use self::account_service::AccountService;
pub use self::admin_service::AdminService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, NewPassword, PASSWORD_MIN_LENGTH, PasswordDigest,
    PasswordHashingError,
};
pub use self::bookmark::{BookmarkRecord, BookmarkToggle, ResolvedBookmark};
pub use self::bookmark_service::BookmarkService;
pub use self::drafting_service::DraftingService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
#[cfg(feature = "example-data")]
pub use self::example_data::{ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError};
pub use self::inbox_poller::{DEFAULT_POLL_INTERVAL, InboxPoller, PollerSettings};
pub use self::interest::{
    InterestKind, InterestRecord, ListingTarget, MAX_INTEREST_MESSAGE_CHARS, ResolvedInterest,
    normalise_message,
};
pub use self::interest_service::InterestService;
pub use self::listing::{
    Badge, BadgeTone, CLOSING_SOON_DAYS, CandidateDraft, CandidateProfile, DEFAULT_LISTING_DAYS,
    ExtensionDays, Lifecycle, Listing, ListingFilter, ListingKind, ListingStatus,
    ListingValidationError,
    MAX_EXTENSION_DAYS, Posting, PostingDraft, badge, days_left,
};
pub use self::listing_service::ListingService;
pub use self::notification::{
    DEFAULT_INBOX_LIMIT, InboxPage, MAX_INBOX_LIMIT, NewNotification, Notification,
    NotificationKind, clamp_inbox_limit,
};
pub use self::notification_service::NotificationService;
pub use self::profile::{
    AVATAR_PREFIX, AvatarUpload, AvatarValidationError, MAX_AVATAR_BYTES, ProfilePatch,
    UserProfile,
};
pub use self::profile_service::ProfileService;
pub use self::trace_id::TraceId;
pub use self::user::{CurrentUser, Role, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use jobboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
