//! Reqwest-backed adapter for OpenAI-compatible chat completion APIs.
//!
//! The adapter owns transport details only: request serialisation, bearer
//! authentication, timeout and status mapping, and extracting the first
//! choice's message text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{GenerationRequest, TextGenerator, TextGeneratorError};

/// Default hosted endpoint base; `/chat/completions` is appended.
pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "HuggingFaceTB/SmolLM3-3B:hf-inference";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 400;

/// Connection settings for [`HttpTextGenerator`].
pub struct TextGeneratorSettings {
    /// Base URL of the API, ending in `/`.
    pub endpoint: Url,
    /// Model sent with every request.
    pub model: String,
    /// Bearer token; requests fail with `NotConfigured` when absent.
    pub api_token: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Text generator calling `{endpoint}chat/completions`.
pub struct HttpTextGenerator {
    client: Client,
    completions_url: Url,
    model: String,
    api_token: Option<Zeroizing<String>>,
}

impl HttpTextGenerator {
    /// Build the adapter with a reqwest client using the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// completions URL cannot be derived from the endpoint.
    pub fn new(settings: TextGeneratorSettings) -> Result<Self, TextGeneratorError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|error| TextGeneratorError::transport(error.to_string()))?;
        let completions_url = settings
            .endpoint
            .join("chat/completions")
            .map_err(|error| TextGeneratorError::transport(error.to_string()))?;
        Ok(Self {
            client,
            completions_url,
            model: settings.model,
            api_token: settings
                .api_token
                .filter(|token| !token.trim().is_empty())
                .map(Zeroizing::new),
        })
    }

    /// Whether a bearer token is configured.
    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_body<'a>(model: &'a str, request: &'a GenerationRequest) -> ChatCompletionBody<'a> {
    ChatCompletionBody {
        model,
        messages: [
            ChatMessage {
                role: "system",
                content: &request.system,
            },
            ChatMessage {
                role: "user",
                content: &request.prompt,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, TextGeneratorError> {
        let token = self
            .api_token
            .as_ref()
            .ok_or(TextGeneratorError::NotConfigured)?;
        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(token.as_str())
            .json(&build_body(&self.model, request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_completion(body.as_ref())
    }
}

fn parse_completion(body: &[u8]) -> Result<String, TextGeneratorError> {
    let decoded: ChatCompletionResponse = serde_json::from_slice(body).map_err(|error| {
        TextGeneratorError::decode(format!("invalid completion payload: {error}"))
    })?;
    decoded
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| TextGeneratorError::decode("completion contained no text"))
}

fn map_transport_error(error: reqwest::Error) -> TextGeneratorError {
    if error.is_timeout() {
        TextGeneratorError::transport(format!("timed out: {error}"))
    } else {
        TextGeneratorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TextGeneratorError {
    TextGeneratorError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
