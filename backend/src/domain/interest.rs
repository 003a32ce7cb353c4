//! Directional interest records: applications to postings and contacts with
//! candidates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Listing, ListingKind, UserId};

/// Longest accepted interest message in characters.
pub const MAX_INTEREST_MESSAGE_CHARS: usize = 2_000;

/// How an actor expressed interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterestKind {
    /// A job seeker applied to a posting.
    Application,
    /// An employer contacted a candidate.
    Contact,
}

impl InterestKind {
    /// Stable string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Contact => "contact",
        }
    }

    /// Kind of listing this interest targets.
    pub const fn target_kind(self) -> ListingKind {
        match self {
            Self::Application => ListingKind::Posting,
            Self::Contact => ListingKind::Candidate,
        }
    }
}

impl fmt::Display for InterestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The listing an interest or bookmark points at.
///
/// Exactly one target exists per record; the tagged form makes a record with
/// both or neither target unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ListingTarget {
    /// A job posting.
    Posting(Uuid),
    /// A candidate profile.
    Candidate(Uuid),
}

impl ListingTarget {
    /// Build a target from a kind and id.
    pub const fn new(kind: ListingKind, id: Uuid) -> Self {
        match kind {
            ListingKind::Posting => Self::Posting(id),
            ListingKind::Candidate => Self::Candidate(id),
        }
    }

    /// Listing identifier.
    pub const fn id(self) -> Uuid {
        match self {
            Self::Posting(id) | Self::Candidate(id) => id,
        }
    }

    /// Listing table.
    pub const fn kind(self) -> ListingKind {
        match self {
            Self::Posting(_) => ListingKind::Posting,
            Self::Candidate(_) => ListingKind::Candidate,
        }
    }

    /// Interest expressed towards this kind of target.
    pub const fn interest_kind(self) -> InterestKind {
        match self {
            Self::Posting(_) => InterestKind::Application,
            Self::Candidate(_) => InterestKind::Contact,
        }
    }

    /// Split into the two nullable columns used by storage.
    pub const fn into_columns(self) -> (Option<Uuid>, Option<Uuid>) {
        match self {
            Self::Posting(id) => (Some(id), None),
            Self::Candidate(id) => (None, Some(id)),
        }
    }

    /// Rebuild from storage columns; `None` unless exactly one is set.
    pub const fn from_columns(posting_id: Option<Uuid>, candidate_id: Option<Uuid>) -> Option<Self> {
        match (posting_id, candidate_id) {
            (Some(id), None) => Some(Self::Posting(id)),
            (None, Some(id)) => Some(Self::Candidate(id)),
            _ => None,
        }
    }
}

/// One actor's recorded interest in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestRecord {
    /// Identifier.
    pub id: Uuid,
    /// User who applied or made contact.
    #[schema(value_type = String)]
    pub actor: UserId,
    /// Listing the interest refers to.
    pub target: ListingTarget,
    /// Optional note for the listing owner.
    pub message: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl InterestRecord {
    /// Application or contact, following the target.
    pub const fn kind(&self) -> InterestKind {
        self.target.interest_kind()
    }
}

/// An interest record together with the listing it points at.
///
/// `listing` is `None` when the target has since been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInterest {
    /// Stored record.
    pub record: InterestRecord,
    /// Target listing, when it still exists.
    pub listing: Option<Listing>,
}

/// Normalise an optional interest message.
///
/// Returns `Err(len)` when the trimmed text is longer than
/// [`MAX_INTEREST_MESSAGE_CHARS`].
pub fn normalise_message(message: Option<String>) -> Result<Option<String>, usize> {
    let Some(text) = message else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let length = trimmed.chars().count();
    if length > MAX_INTEREST_MESSAGE_CHARS {
        return Err(length);
    }
    Ok(Some(trimmed.to_owned()))
}
