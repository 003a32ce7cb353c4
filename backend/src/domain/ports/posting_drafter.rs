//! Driving port for AI-assisted posting drafts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;

/// Inputs for a drafted posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    /// Studio location.
    pub location: String,
    /// Yoga style.
    pub category: String,
    /// Required experience; defaults to "any".
    pub experience: Option<String>,
    /// Compensation; defaults to "negotiable".
    pub compensation: Option<String>,
}

/// Generated posting text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftedPosting {
    /// Draft body.
    pub text: String,
}

/// Drafting use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostingDrafter: Send + Sync {
    /// Generate a posting draft.
    async fn draft(&self, request: DraftRequest) -> Result<DraftedPosting, Error>;
}
