//! Generation provider port
//!
//! Defines the interface for the text generation service.

use agenda_domain::ResponseSchema;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by external providers (generation and search)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider is not configured: {0}")]
    Misconfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Per-request options for [`GenerationProvider::complete`].
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// System prompt to send ahead of the user prompt.
    pub system_prompt: Option<String>,
    /// When set, the provider must return JSON conforming to this schema.
    pub response_schema: Option<ResponseSchema>,
}

impl CompletionOptions {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_response_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Text generation service
///
/// This port defines how the application layer requests generated text.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Complete `prompt`, returning the raw generated text.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}
