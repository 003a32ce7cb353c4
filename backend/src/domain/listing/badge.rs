//! Display badge derived from a listing's status and expiry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ListingStatus;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Listings with this many days left or fewer are "closing soon".
pub const CLOSING_SOON_DAYS: i64 = 3;

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    /// Closed by the owner.
    Red,
    /// Past its expiry.
    Gray,
    /// Expiring within [`CLOSING_SOON_DAYS`].
    Yellow,
    /// Open with time to spare.
    Green,
}

/// Human-readable status classification for a listing.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use jobboard::domain::{BadgeTone, ListingStatus, badge};
///
/// let now = Utc::now();
/// let badge = badge(ListingStatus::Active, Some(now + Duration::days(30)), now);
/// assert_eq!(badge.label, "active (30 days remaining)");
/// assert_eq!(badge.tone, BadgeTone::Green);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Badge {
    /// Text shown to users.
    pub label: String,
    /// Colour family.
    pub tone: BadgeTone,
}

impl Badge {
    fn new(label: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

/// Whole days until `expires_at`, rounded up.
///
/// Returns `None` once the expiry has passed.
pub fn days_left(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<i64> {
    if expires_at < now {
        return None;
    }
    let millis = (expires_at - now).num_milliseconds();
    let whole = millis / MILLIS_PER_DAY;
    Some(if millis % MILLIS_PER_DAY > 0 { whole + 1 } else { whole })
}

fn day_phrase(days: i64) -> String {
    if days == 1 {
        "1 day".to_owned()
    } else {
        format!("{days} days")
    }
}

/// Derive the badge for a listing at `now`.
///
/// Closed wins over everything. A missing or past expiry is "expired".
/// Zero days left still counts as closing soon.
pub fn badge(status: ListingStatus, expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Badge {
    if status == ListingStatus::Closed {
        return Badge::new("closed", BadgeTone::Red);
    }
    match expires_at.and_then(|expiry| days_left(expiry, now)) {
        None => Badge::new("expired", BadgeTone::Gray),
        Some(days) if days <= CLOSING_SOON_DAYS => Badge::new(
            format!("closing soon ({})", day_phrase(days)),
            BadgeTone::Yellow,
        ),
        Some(days) => Badge::new(
            format!("active ({} remaining)", day_phrase(days)),
            BadgeTone::Green,
        ),
    }
}
