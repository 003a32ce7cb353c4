//! Job postings published by studios.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Lifecycle, ListingValidationError, required_text};
use crate::domain::UserId;

/// Fields supplied by an employer when publishing a posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostingDraft {
    /// Headline.
    pub title: String,
    /// Free-text location.
    pub location: String,
    /// Yoga style.
    pub category: String,
    /// Required experience.
    pub experience: Option<String>,
    /// Compensation text.
    pub compensation: Option<String>,
    /// Body text.
    pub description: Option<String>,
}

/// A published job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    /// Identifier.
    pub id: Uuid,
    /// Publishing user.
    #[schema(value_type = String)]
    pub owner: UserId,
    /// Headline.
    pub title: String,
    /// Free-text location.
    pub location: String,
    /// Yoga style.
    pub category: String,
    /// Required experience.
    pub experience: Option<String>,
    /// Compensation text.
    pub compensation: Option<String>,
    /// Body text.
    pub description: Option<String>,
    /// Status and timestamps.
    pub lifecycle: Lifecycle,
}

impl Posting {
    /// Validate a draft and open a new posting at `now`.
    ///
    /// # Errors
    /// Returns [`ListingValidationError::MissingField`] when title, location
    /// or category is blank.
    pub fn publish(
        id: Uuid,
        owner: UserId,
        draft: PostingDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, ListingValidationError> {
        let PostingDraft {
            title,
            location,
            category,
            experience,
            compensation,
            description,
        } = draft;
        Ok(Self {
            id,
            owner,
            title: required_text(title, "title")?,
            location: required_text(location, "location")?,
            category: required_text(category, "category")?,
            experience: optional_text(experience),
            compensation: optional_text(compensation),
            description: optional_text(description),
            lifecycle: Lifecycle::opened_at(now),
        })
    }
}

pub(super) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
