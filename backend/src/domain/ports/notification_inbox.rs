//! Driving port for a user's notification inbox.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, InboxPage, UserId};

/// Inbox reads and read-state changes, confined to the recipient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Newest notifications with the unread count of that page.
    async fn list_recent(&self, recipient: &UserId, limit: usize) -> Result<InboxPage, Error>;

    /// Mark one notification read.
    async fn mark_read(&self, recipient: &UserId, id: Uuid) -> Result<(), Error>;

    /// Mark every notification read; returns how many changed.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, Error>;
}
