//! Driven port for notification storage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Notification, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
        /// A stored row violated a domain invariant.
        Corrupt { message: String } => "stored notification is invalid: {message}",
    }
}

/// Storage for inbox notifications.
///
/// Read-state mutations only touch rows owned by `recipient`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a notification.
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError>;

    /// Newest notifications for `recipient`, at most `limit`.
    async fn list_recent(
        &self,
        recipient: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Mark one notification read; `false` when it is not the recipient's.
    async fn mark_read(
        &self,
        recipient: &UserId,
        id: Uuid,
    ) -> Result<bool, NotificationRepositoryError>;

    /// Mark every unread notification read, returning how many changed.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError>;
}
