//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, blob storage, text generation) are
//! implemented by outbound adapters. Driving ports are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod admin_command;
mod blob_storage;
mod bookmark_ledger;
mod bookmark_repository;
mod example_data_seed_repository;
mod interest_ledger;
mod interest_repository;
mod listing_command;
mod listing_repository;
mod login_service;
mod notification_inbox;
mod notification_repository;
mod posting_drafter;
mod profile_command;
mod text_generator;
mod user_profile_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{Account, AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use admin_command::MockAdminCommand;
pub use admin_command::AdminCommand;
#[cfg(test)]
pub use blob_storage::MockBlobStorage;
pub use blob_storage::{BlobStorage, BlobStorageError};
#[cfg(test)]
pub use bookmark_ledger::{MockBookmarkCommand, MockBookmarkQuery};
pub use bookmark_ledger::{BookmarkCommand, BookmarkQuery};
#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
pub use bookmark_repository::{BookmarkRepository, BookmarkRepositoryError};
#[cfg(test)]
pub use example_data_seed_repository::MockExampleDataSeedRepository;
pub use example_data_seed_repository::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult,
};
#[cfg(test)]
pub use interest_ledger::{MockInterestCommand, MockInterestQuery};
pub use interest_ledger::{InterestCommand, InterestQuery};
#[cfg(test)]
pub use interest_repository::MockInterestRepository;
pub use interest_repository::{InterestRepository, InterestRepositoryError};
#[cfg(test)]
pub use listing_command::{MockListingCommand, MockListingQuery};
pub use listing_command::{ListingCommand, ListingDetail, ListingQuery, ListingView};
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::NotificationInbox;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use posting_drafter::MockPostingDrafter;
pub use posting_drafter::{DraftRequest, DraftedPosting, PostingDrafter};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{AvatarFile, ProfileCommand};
#[cfg(test)]
pub use text_generator::MockTextGenerator;
pub use text_generator::{GenerationRequest, TextGenerator, TextGeneratorError};
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{
    UserProfileRepository, UserProfileRepositoryError,
};
