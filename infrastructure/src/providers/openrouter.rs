//! OpenRouter generation adapter
//!
//! Implements [`GenerationProvider`] over the OpenAI-compatible chat
//! completions endpoint. When the request carries a response schema, it is
//! sent as `response_format: {type: "json_schema"}` so the model answers
//! with JSON the extractor can take directly.

use super::{api_key_from_env, transport_error};
use crate::config::FileProviderConfig;
use agenda_application::{CompletionOptions, GenerationProvider, ProviderError};
use agenda_domain::core::string::truncate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// HTTP referer sent with every request, used by OpenRouter for attribution
const REFERER: &str = "https://github.com/music-brain88/agenda-forge";

/// X-Title header value
const TITLE: &str = "agenda-forge";

/// Longest error body kept in a [`ProviderError::HttpStatus`]
const MAX_ERROR_BODY: usize = 500;

/// OpenRouter chat completions client
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenRouterProvider {
    /// Build a client from `[provider]`, reading the key from `api_key_env`.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, ProviderError> {
        let api_key = api_key_from_env(&config.api_key_env, "provider")?;
        Self::new(api_key, config)
    }

    pub fn new(api_key: String, config: &FileProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Misconfigured(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, prompt: &str, options: &CompletionOptions) -> OpenRouterRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &options.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let response_format = options.response_schema.as_ref().map(|schema| {
            json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "strict": true,
                    "schema": schema.schema,
                }
            })
        });

        OpenRouterRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
            response_format,
        }
    }
}

/// Pull the assistant text out of a completion envelope.
fn content_from(response: OpenRouterResponse) -> Result<String, ProviderError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        ProviderError::MalformedResponse("response has no choices".to_string())
    })?;
    choice.message.content.ok_or_else(|| {
        ProviderError::MalformedResponse("choices[0] has no message content".to_string())
    })
}

#[async_trait]
impl GenerationProvider for OpenRouterProvider {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        debug!(
            provider = "openrouter",
            model = %self.model,
            prompt_chars = prompt.len(),
            structured = options.response_schema.is_some(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&self.request_body(prompt, options))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let envelope: OpenRouterResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        if let Some(usage) = &envelope.usage {
            debug!(
                provider = "openrouter",
                tokens_input = usage.prompt_tokens,
                tokens_output = usage.completion_tokens,
                "Completion finished"
            );
        }

        content_from(envelope)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct OpenRouterRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenRouterResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_domain::ResponseSchema;

    fn provider() -> OpenRouterProvider {
        OpenRouterProvider::new("test-key".to_string(), &FileProviderConfig::default()).unwrap()
    }

    #[test]
    fn test_request_body_plain() {
        let options = CompletionOptions::default().with_system_prompt("Be brief.");
        let body = serde_json::to_value(provider().request_body("Hello", &options)).unwrap();

        assert_eq!(body["model"], "anthropic/claude-3-opus");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hello");
        assert_eq!(body["stream"], false);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_request_body_with_schema() {
        let options = CompletionOptions::default().with_response_schema(ResponseSchema::speakers());
        let body = serde_json::to_value(provider().request_body("Hello", &options)).unwrap();

        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "speakers");
        assert!(body["response_format"]["json_schema"]["schema"].is_object());
    }

    #[test]
    fn test_content_from_envelope() {
        let envelope: OpenRouterResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Panel 1: A – B"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5}}"#,
        )
        .unwrap();
        assert_eq!(content_from(envelope).unwrap(), "Panel 1: A – B");
    }

    #[test]
    fn test_content_from_malformed_envelope() {
        let empty: OpenRouterResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            content_from(empty),
            Err(ProviderError::MalformedResponse(_))
        ));

        let no_content: OpenRouterResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(
            content_from(no_content),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = FileProviderConfig {
            api_key_env: "AGENDA_FORGE_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            OpenRouterProvider::from_config(&config),
            Err(ProviderError::Misconfigured(_))
        ));
    }
}
