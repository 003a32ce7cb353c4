//! AI-assisted posting drafts.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{
    DraftRequest, DraftedPosting, GenerationRequest, PostingDrafter, TextGenerator,
    TextGeneratorError,
};
use crate::domain::Error;

const SYSTEM_PROMPT: &str = "You are an HR expert who writes clear, friendly job posts for \
yoga studios hiring instructors. Answer with the job post text only.";
const DEFAULT_EXPERIENCE: &str = "any";
const DEFAULT_COMPENSATION: &str = "negotiable";

/// Drafting service implementing [`PostingDrafter`].
#[derive(Clone)]
pub struct DraftingService<T> {
    generator: Arc<T>,
}

impl<T> DraftingService<T> {
    /// Create a new service.
    pub fn new(generator: Arc<T>) -> Self {
        Self { generator }
    }
}

fn required(value: &str, field: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request(format!("{field} is required"))
            .with_details(json!({ "field": field, "code": "missing_field" })));
    }
    Ok(trimmed.to_owned())
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_owned()
}

pub(crate) fn build_prompt(request: &DraftRequest) -> Result<String, Error> {
    let location = required(&request.location, "location")?;
    let category = required(&request.category, "category")?;
    let experience = or_default(request.experience.as_deref(), DEFAULT_EXPERIENCE);
    let compensation = or_default(request.compensation.as_deref(), DEFAULT_COMPENSATION);
    Ok(format!(
        "Write a job post for a yoga instructor.\n\
         - Location: {location}\n\
         - Yoga style: {category}\n\
         - Required experience: {experience}\n\
         - Compensation: {compensation}\n\
         Include the role, responsibilities, requirements and benefits."
    ))
}

fn generation_error(error: TextGeneratorError) -> Error {
    match error {
        TextGeneratorError::Status { status, .. } => {
            Error::service_unavailable(format!("draft generation failed (status {status})"))
        }
        TextGeneratorError::NotConfigured => {
            Error::service_unavailable("draft generation is not configured")
        }
        TextGeneratorError::Transport { .. } | TextGeneratorError::Decode { .. } => {
            Error::service_unavailable("draft generation failed")
        }
    }
}

#[async_trait]
impl<T> PostingDrafter for DraftingService<T>
where
    T: TextGenerator,
{
    async fn draft(&self, request: DraftRequest) -> Result<DraftedPosting, Error> {
        let prompt = build_prompt(&request)?;
        let text = self
            .generator
            .generate(&GenerationRequest {
                system: SYSTEM_PROMPT.to_owned(),
                prompt,
            })
            .await
            .map_err(|error| {
                warn!(%error, "text generation failed");
                generation_error(error)
            })?;
        Ok(DraftedPosting {
            text: text.trim().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockTextGenerator;
    use rstest::rstest;

    fn request() -> DraftRequest {
        DraftRequest {
            location: "Jeju".to_owned(),
            category: "Vinyasa".to_owned(),
            experience: None,
            compensation: Some("  ".to_owned()),
        }
    }

    #[rstest]
    fn prompt_fills_defaults() {
        let prompt = build_prompt(&request()).expect("prompt");
        assert!(prompt.contains("Location: Jeju"));
        assert!(prompt.contains("Required experience: any"));
        assert!(prompt.contains("Compensation: negotiable"));
    }

    #[rstest]
    #[case::location(DraftRequest { location: " ".to_owned(), ..request() }, "location")]
    #[case::category(DraftRequest { category: String::new(), ..request() }, "category")]
    fn prompt_requires_fields(#[case] input: DraftRequest, #[case] field: &str) {
        let error = build_prompt(&input).expect_err("missing field");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details().and_then(|d| d.get("field")),
            Some(&json!(field))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn draft_returns_generated_text() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|req| req.system == SYSTEM_PROMPT && req.prompt.contains("Vinyasa"))
            .times(1)
            .return_once(|_| Ok("\n Join our studio! \n".to_owned()));

        let drafted = DraftingService::new(Arc::new(generator))
            .draft(request())
            .await
            .expect("drafted");
        assert_eq!(drafted.text, "Join our studio!");
    }

    #[rstest]
    #[tokio::test]
    async fn provider_status_is_reported() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .return_once(|_| Err(TextGeneratorError::status(503_u16, "busy")));

        let error = DraftingService::new(Arc::new(generator))
            .draft(request())
            .await
            .expect_err("provider failure");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(error.message().contains("503"));
    }
}
