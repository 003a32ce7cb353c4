//! Inbox notifications raised by interest events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{InterestKind, UserId};

/// Page size used by the notification bell.
pub const DEFAULT_INBOX_LIMIT: usize = 10;
/// Largest page a caller may request.
pub const MAX_INBOX_LIMIT: usize = 100;
/// Unread counts above this are shown as `9+`.
const BADGE_CAP: usize = 9;

/// Why a notification was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone applied to the recipient's posting.
    Application,
    /// Someone contacted the recipient's candidate profile.
    Contact,
}

impl NotificationKind {
    /// Stable string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Contact => "contact",
        }
    }

    /// Parse the stored form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "application" => Some(Self::Application),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }
}

impl From<InterestKind> for NotificationKind {
    fn from(kind: InterestKind) -> Self {
        match kind {
            InterestKind::Application => Self::Application,
            InterestKind::Contact => Self::Contact,
        }
    }
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier.
    pub id: Uuid,
    /// Owner of the inbox.
    #[schema(value_type = String)]
    pub recipient: UserId,
    /// Event type.
    pub kind: NotificationKind,
    /// Application or contact record that raised the event.
    pub related_item_id: Uuid,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the recipient has seen it.
    pub read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Payload for [`crate::domain::NotificationService::notify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// Owner of the inbox.
    pub recipient: UserId,
    /// Event type.
    pub kind: NotificationKind,
    /// Application or contact record that raised the event.
    pub related_item_id: Uuid,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl NewNotification {
    /// Tell a posting owner that someone applied.
    pub fn application_received(
        recipient: UserId,
        application_id: Uuid,
        posting_title: &str,
    ) -> Self {
        Self {
            recipient,
            kind: NotificationKind::Application,
            related_item_id: application_id,
            title: "New application received!".to_owned(),
            message: format!("\"{posting_title}\" posting has an applicant."),
        }
    }

    /// Tell a candidate owner that a studio made contact.
    pub fn contact_received(recipient: UserId, contact_id: Uuid, candidate_name: &str) -> Self {
        Self {
            recipient,
            kind: NotificationKind::Contact,
            related_item_id: contact_id,
            title: "New contact received!".to_owned(),
            message: format!("\"{candidate_name}\" resume was contacted by a center."),
        }
    }

    /// Materialise the stored record.
    pub fn into_notification(self, id: Uuid, created_at: DateTime<Utc>) -> Notification {
        let Self {
            recipient,
            kind,
            related_item_id,
            title,
            message,
        } = self;
        Notification {
            id,
            recipient,
            kind,
            related_item_id,
            title,
            message,
            read: false,
            created_at,
        }
    }
}

/// The recent page of an inbox with its derived unread count.
///
/// The count only covers the fetched page, so it undercounts when more
/// unread records exist beyond the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxPage {
    /// Newest first.
    pub notifications: Vec<Notification>,
    /// Unread records in `notifications`.
    pub unread_count: usize,
    /// Bell label: empty, the count, or `9+`.
    pub badge_label: String,
}

impl InboxPage {
    /// Derive the unread count from a fetched page.
    pub fn from_page(notifications: Vec<Notification>) -> Self {
        let unread_count = notifications.iter().filter(|n| !n.read).count();
        let badge_label = match unread_count {
            0 => String::new(),
            n if n > BADGE_CAP => format!("{BADGE_CAP}+"),
            n => n.to_string(),
        };
        Self {
            notifications,
            unread_count,
            badge_label,
        }
    }
}

/// Clamp a requested page size to `1..=MAX_INBOX_LIMIT`.
pub fn clamp_inbox_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_INBOX_LIMIT)
        .clamp(1, MAX_INBOX_LIMIT)
}
