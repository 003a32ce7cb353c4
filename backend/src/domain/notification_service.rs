//! Notification domain service.
//!
//! `notify` is fire-and-forget: storage failures are logged and swallowed so
//! the triggering action still succeeds. Inbox reads and read-state changes
//! are scoped to the recipient.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{NotificationInbox, NotificationRepository};
use crate::domain::repository_errors::map_notification_error;
use crate::domain::{Error, InboxPage, MAX_INBOX_LIMIT, NewNotification, UserId};

/// Notification service implementing [`NotificationInbox`].
#[derive(Clone)]
pub struct NotificationService<N> {
    repo: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NotificationService<N> {
    /// Create a new service with the given repository and clock.
    pub fn new(repo: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<N> NotificationService<N>
where
    N: NotificationRepository,
{
    /// Store one notification, logging instead of failing.
    ///
    /// Returns whether the notification was stored.
    pub async fn notify(&self, notification: NewNotification) -> bool {
        let recipient = notification.recipient.clone();
        let kind = notification.kind;
        let record = notification.into_notification(Uuid::new_v4(), self.clock.utc());
        match self.repo.insert(&record).await {
            Ok(()) => {
                debug!(%recipient, kind = kind.as_str(), "notification stored");
                true
            }
            Err(error) => {
                warn!(%recipient, kind = kind.as_str(), %error, "failed to store notification");
                false
            }
        }
    }
}

#[async_trait]
impl<N> NotificationInbox for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn list_recent(&self, recipient: &UserId, limit: usize) -> Result<InboxPage, Error> {
        let notifications = self
            .repo
            .list_recent(recipient, limit.clamp(1, MAX_INBOX_LIMIT))
            .await
            .map_err(map_notification_error)?;
        Ok(InboxPage::from_page(notifications))
    }

    async fn mark_read(&self, recipient: &UserId, id: Uuid) -> Result<(), Error> {
        let updated = self
            .repo
            .mark_read(recipient, id)
            .await
            .map_err(map_notification_error)?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found(format!("notification {id} not found")))
        }
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, Error> {
        self.repo
            .mark_all_read(recipient)
            .await
            .map_err(map_notification_error)
    }
}
