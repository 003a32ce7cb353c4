//! Lifecycle state shared by postings and candidate profiles.
//!
//! Transitions are pure: each returns the next state for the caller to
//! persist in a single update. `expired` is never stored; it is derived from
//! the status and expiry at read time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Badge, ListingValidationError, badge};

/// Length of a fresh listing window in days.
pub const DEFAULT_LISTING_DAYS: i64 = 30;

/// Longest extension accepted in one call.
pub const MAX_EXTENSION_DAYS: i64 = 365;

/// Persisted listing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Visible and accepting interest until it expires.
    Active,
    /// Closed by its owner.
    Closed,
}

impl ListingStatus {
    /// Stable string form used in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = ListingValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            other => Err(ListingValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Number of days to push the expiry out by, measured from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionDays(i64);

impl ExtensionDays {
    /// Validate an extension length.
    ///
    /// # Errors
    /// Returns [`ListingValidationError::ExtensionOutOfRange`] outside
    /// `1..=MAX_EXTENSION_DAYS`.
    pub fn new(days: i64) -> Result<Self, ListingValidationError> {
        if (1..=MAX_EXTENSION_DAYS).contains(&days) {
            Ok(Self(days))
        } else {
            Err(ListingValidationError::ExtensionOutOfRange {
                max: MAX_EXTENSION_DAYS,
                actual: days,
            })
        }
    }

    /// Days as an integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Default for ExtensionDays {
    fn default() -> Self {
        Self(DEFAULT_LISTING_DAYS)
    }
}

/// Status and timestamps of a listing.
///
/// ## Invariants
/// - `closed_at` is set if and only if `status` is [`ListingStatus::Closed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    status: ListingStatus,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
}

impl Lifecycle {
    /// State of a listing created at `now`: active for the default window.
    pub fn opened_at(now: DateTime<Utc>) -> Self {
        Self {
            status: ListingStatus::Active,
            created_at: now,
            closed_at: None,
            expires_at: Some(now + Duration::days(DEFAULT_LISTING_DAYS)),
        }
    }

    /// Rebuild a lifecycle from stored values.
    ///
    /// # Errors
    /// Returns [`ListingValidationError::InconsistentClosedAt`] when the
    /// `closed_at` invariant is broken.
    pub fn try_new(
        status: ListingStatus,
        created_at: DateTime<Utc>,
        closed_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ListingValidationError> {
        let consistent = match status {
            ListingStatus::Closed => closed_at.is_some(),
            ListingStatus::Active => closed_at.is_none(),
        };
        if !consistent {
            return Err(ListingValidationError::InconsistentClosedAt);
        }
        Ok(Self {
            status,
            created_at,
            closed_at,
            expires_at,
        })
    }

    /// Persisted status.
    pub fn status(&self) -> ListingStatus {
        self.status
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the listing was last closed, if it is closed.
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Expiry deadline.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Close the listing. Closing again moves `closed_at` forward.
    pub fn close(&self, now: DateTime<Utc>) -> Self {
        Self {
            status: ListingStatus::Closed,
            closed_at: Some(now),
            ..self.clone()
        }
    }

    /// Reopen with a fresh window starting at `now`.
    pub fn reopen(&self, now: DateTime<Utc>) -> Self {
        Self {
            status: ListingStatus::Active,
            closed_at: None,
            expires_at: Some(now + Duration::days(DEFAULT_LISTING_DAYS)),
            ..self.clone()
        }
    }

    /// Reset the expiry to `days` from `now`. Status is left untouched.
    pub fn extend(&self, now: DateTime<Utc>, days: ExtensionDays) -> Self {
        Self {
            expires_at: Some(now + Duration::days(days.get())),
            ..self.clone()
        }
    }

    /// Active but past its expiry (or with none recorded).
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == ListingStatus::Active && self.expires_at.is_none_or(|expiry| now > expiry)
    }

    /// Active and within its window; these appear on public lists.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.status == ListingStatus::Active && !self.is_expired(now)
    }

    /// Badge for display at `now`.
    pub fn badge(&self, now: DateTime<Utc>) -> Badge {
        badge(self.status, self.expires_at, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0)
            .single()
            .expect("fixed timestamp")
    }

    #[rstest]
    fn new_listings_are_active_for_thirty_days(created: DateTime<Utc>) {
        let lifecycle = Lifecycle::opened_at(created);
        assert_eq!(lifecycle.status(), ListingStatus::Active);
        assert_eq!(lifecycle.closed_at(), None);
        assert_eq!(lifecycle.expires_at(), Some(created + Duration::days(30)));
    }

    #[rstest]
    fn closing_twice_moves_closed_at_forward(created: DateTime<Utc>) {
        let first = Lifecycle::opened_at(created).close(created + Duration::hours(1));
        let second = first.close(created + Duration::hours(2));

        assert_eq!(first.status(), ListingStatus::Closed);
        assert_eq!(second.status(), ListingStatus::Closed);
        assert_eq!(second.closed_at(), Some(created + Duration::hours(2)));
    }

    #[rstest]
    fn reopen_resets_the_window(created: DateTime<Utc>) {
        let later = created + Duration::days(90);
        let reopened = Lifecycle::opened_at(created)
            .close(created + Duration::days(1))
            .reopen(later);

        assert_eq!(reopened.status(), ListingStatus::Active);
        assert_eq!(reopened.closed_at(), None);
        assert_eq!(reopened.expires_at(), Some(later + Duration::days(30)));
        assert_eq!(reopened.created_at(), created);
    }

    #[rstest]
    fn extend_resets_rather_than_adds(created: DateTime<Utc>) {
        let days = ExtensionDays::default();
        let once = Lifecycle::opened_at(created).extend(created, days);
        let twice = once.extend(created + Duration::seconds(5), days);

        assert_eq!(
            twice.expires_at(),
            Some(created + Duration::seconds(5) + Duration::days(30))
        );
    }

    #[rstest]
    fn extend_keeps_a_closed_listing_closed(created: DateTime<Utc>) {
        let closed = Lifecycle::opened_at(created).close(created);
        let extended = closed.extend(created, ExtensionDays::default());
        assert_eq!(extended.status(), ListingStatus::Closed);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(MAX_EXTENSION_DAYS + 1)]
    fn extension_days_are_bounded(#[case] days: i64) {
        assert!(matches!(
            ExtensionDays::new(days),
            Err(ListingValidationError::ExtensionOutOfRange { .. })
        ));
    }

    #[rstest]
    #[case(ListingStatus::Closed, None)]
    #[case(ListingStatus::Active, Some(0))]
    fn try_new_enforces_closed_at_invariant(
        created: DateTime<Utc>,
        #[case] status: ListingStatus,
        #[case] closed_offset: Option<i64>,
    ) {
        let closed_at = closed_offset.map(|h| created + Duration::hours(h));
        let result = Lifecycle::try_new(status, created, closed_at, None);
        assert_eq!(result, Err(ListingValidationError::InconsistentClosedAt));
    }

    #[rstest]
    fn expiry_is_derived_from_time(created: DateTime<Utc>) {
        let lifecycle = Lifecycle::opened_at(created);
        let deadline = created + Duration::days(30);

        assert!(lifecycle.is_open(deadline));
        assert!(lifecycle.is_expired(deadline + Duration::seconds(1)));
        assert!(!lifecycle.close(created).is_expired(deadline + Duration::days(1)));
    }
}
