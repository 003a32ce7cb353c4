//! Listings: postings and candidate profiles sharing one lifecycle.
//!
//! The lifecycle engine lives in [`lifecycle`] (transitions) and [`badge`]
//! (display classification). Entity types validate their drafts on publish.

mod badge;
mod candidate;
mod filter;
mod lifecycle;
mod posting;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub use badge::{Badge, BadgeTone, CLOSING_SOON_DAYS, badge, days_left};
pub use candidate::{CandidateDraft, CandidateProfile};
pub use filter::ListingFilter;
pub use lifecycle::{
    DEFAULT_LISTING_DAYS, ExtensionDays, Lifecycle, ListingStatus, MAX_EXTENSION_DAYS,
};
pub use posting::{Posting, PostingDraft};

use crate::domain::{ListingTarget, UserId};

/// Validation failures for listing input and stored state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    MissingField {
        /// Field name in API casing.
        field: &'static str,
    },
    /// A candidate profile listed no styles.
    #[error("at least one yoga style is required")]
    NoStyles,
    /// An extension length was outside the accepted range.
    #[error("extension must be between 1 and {max} days, got {actual}")]
    ExtensionOutOfRange {
        /// Longest accepted extension.
        max: i64,
        /// Requested extension.
        actual: i64,
    },
    /// Stored status text was not recognised.
    #[error("unknown listing status '{value}'")]
    UnknownStatus {
        /// Offending value.
        value: String,
    },
    /// `closed_at` disagreed with the status.
    #[error("closed_at must be set exactly when the listing is closed")]
    InconsistentClosedAt,
    /// Listing kind text was not recognised.
    #[error("kind must be posting or candidate")]
    UnknownKind,
}

pub(crate) fn required_text(
    value: String,
    field: &'static str,
) -> Result<String, ListingValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ListingValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

/// Which listing table a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    /// Job posting.
    Posting,
    /// Candidate profile.
    Candidate,
}

impl ListingKind {
    /// Stable string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posting => "posting",
            Self::Candidate => "candidate",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = ListingValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "posting" => Ok(Self::Posting),
            "candidate" => Ok(Self::Candidate),
            _ => Err(ListingValidationError::UnknownKind),
        }
    }
}

/// Either kind of listing, as resolved for ledgers and admin views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Listing {
    /// Job posting.
    Posting(Posting),
    /// Candidate profile.
    Candidate(CandidateProfile),
}

impl Listing {
    /// Listing identifier.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Posting(posting) => posting.id,
            Self::Candidate(candidate) => candidate.id,
        }
    }

    /// Kind and id together.
    pub fn target(&self) -> ListingTarget {
        ListingTarget::new(self.kind(), self.id())
    }

    /// Which table the listing lives in.
    pub fn kind(&self) -> ListingKind {
        match self {
            Self::Posting(_) => ListingKind::Posting,
            Self::Candidate(_) => ListingKind::Candidate,
        }
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        match self {
            Self::Posting(posting) => &posting.owner,
            Self::Candidate(candidate) => &candidate.owner,
        }
    }

    /// Posting title or candidate name.
    pub fn headline(&self) -> &str {
        match self {
            Self::Posting(posting) => &posting.title,
            Self::Candidate(candidate) => &candidate.name,
        }
    }

    /// Status and timestamps.
    pub fn lifecycle(&self) -> &Lifecycle {
        match self {
            Self::Posting(posting) => &posting.lifecycle,
            Self::Candidate(candidate) => &candidate.lifecycle,
        }
    }

    /// Replace the lifecycle, keeping every other field.
    pub fn with_lifecycle(self, lifecycle: Lifecycle) -> Self {
        match self {
            Self::Posting(posting) => Self::Posting(Posting {
                lifecycle,
                ..posting
            }),
            Self::Candidate(candidate) => Self::Candidate(CandidateProfile {
                lifecycle,
                ..candidate
            }),
        }
    }
}
