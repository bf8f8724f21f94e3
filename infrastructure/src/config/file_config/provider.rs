//! Generation provider configuration from TOML (`[provider]` section)

use agenda_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Default OpenRouter chat completions endpoint
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Raw OpenRouter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENROUTER_KEY".to_string(),
            base_url: DEFAULT_OPENROUTER_URL.to_string(),
            model: "anthropic/claude-3-opus".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

impl FileProviderConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("provider.model", &self.model),
            ("provider.base_url", &self.base_url),
            ("provider.api_key_env", &self.api_key_env),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    format!("{} must not be empty", field),
                ));
            }
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "provider.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "provider.timeout_secs must be at least 1",
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "provider.temperature".to_string(),
                    value: self.temperature.to_string(),
                },
                format!(
                    "provider.temperature {} is outside 0.0..=2.0; the provider may reject it",
                    self.temperature
                ),
            ));
        }

        issues
    }
}
