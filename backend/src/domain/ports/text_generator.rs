//! Driven port for hosted text generation.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by text generation adapters.
    pub enum TextGeneratorError {
        /// The request could not be sent or timed out.
        Transport { message: String } => "text generation request failed: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, message: String } => "text generation returned status {status}: {message}",
        /// The response body had no usable text.
        Decode { message: String } => "text generation response invalid: {message}",
        /// No credentials are configured.
        NotConfigured => "text generation is not configured",
    }
}

/// A single chat completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// System instruction.
    pub system: String,
    /// User prompt.
    pub prompt: String,
}

/// Text generator behind a chat completion API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, TextGeneratorError>;
}
