//! Candidate profiles (résumés) published by instructors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::posting::optional_text;
use super::{Lifecycle, ListingValidationError, required_text};
use crate::domain::UserId;

/// Fields supplied by an instructor when publishing a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    /// Instructor name.
    pub name: String,
    /// Preferred location.
    pub location: String,
    /// Yoga styles taught.
    pub styles: Vec<String>,
    /// Experience level.
    pub experience_level: Option<String>,
    /// Certifications held.
    pub certifications: Option<String>,
    /// Photo URL.
    pub photo_url: Option<String>,
    /// Introduction text.
    pub introduction: String,
}

/// A published candidate profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    /// Identifier.
    pub id: Uuid,
    /// Publishing user.
    #[schema(value_type = String)]
    pub owner: UserId,
    /// Instructor name.
    pub name: String,
    /// Preferred location.
    pub location: String,
    /// Yoga styles taught.
    pub styles: Vec<String>,
    /// Experience level.
    pub experience_level: Option<String>,
    /// Certifications held.
    pub certifications: Option<String>,
    /// Photo URL.
    pub photo_url: Option<String>,
    /// Introduction text.
    pub introduction: String,
    /// Status and timestamps.
    pub lifecycle: Lifecycle,
}

impl CandidateProfile {
    /// Validate a draft and open a new profile at `now`.
    ///
    /// # Errors
    /// Returns [`ListingValidationError`] when name, location or
    /// introduction is blank, or no style survives trimming.
    pub fn publish(
        id: Uuid,
        owner: UserId,
        draft: CandidateDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, ListingValidationError> {
        let CandidateDraft {
            name,
            location,
            styles,
            experience_level,
            certifications,
            photo_url,
            introduction,
        } = draft;
        let name = required_text(name, "name")?;
        let location = required_text(location, "location")?;
        let styles: Vec<String> = styles
            .into_iter()
            .map(|style| style.trim().to_owned())
            .filter(|style| !style.is_empty())
            .collect();
        if styles.is_empty() {
            return Err(ListingValidationError::NoStyles);
        }
        let introduction = required_text(introduction, "introduction")?;

        Ok(Self {
            id,
            owner,
            name,
            location,
            styles,
            experience_level: optional_text(experience_level),
            certifications: optional_text(certifications),
            photo_url: optional_text(photo_url),
            introduction,
            lifecycle: Lifecycle::opened_at(now),
        })
    }
}
