//! Web search configuration from TOML (`[search]` section)

use agenda_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Default SerpAPI endpoint
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search";

/// Raw SerpAPI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Ground speaker suggestions in web search results
    pub enabled: bool,
    pub api_key_env: String,
    pub base_url: String,
    pub engine: String,
    /// Results passed to the model as references
    pub max_results: usize,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "SERPAPI_KEY".to_string(),
            base_url: DEFAULT_SERPAPI_URL.to_string(),
            engine: "google".to_string(),
            max_results: 5,
        }
    }
}

impl FileSearchConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.enabled {
            return issues;
        }

        if self.engine.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "search.engine".to_string(),
                },
                "search.engine must not be empty",
            ));
        }

        if self.max_results == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "search.max_results".to_string(),
                    value: "0".to_string(),
                },
                "search.max_results is 0; searches will run but no references are used",
            ));
        }

        issues
    }
}
