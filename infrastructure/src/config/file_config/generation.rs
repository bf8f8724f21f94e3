//! Generation configuration from TOML (`[generation]` section)

use agenda_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Upper bound above which a speaker count is almost certainly a typo
const MAX_SPEAKERS_PER_PANEL: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub speakers_per_panel: usize,
    /// Request JSON output conforming to a schema
    pub structured_output: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            speakers_per_panel: 3,
            structured_output: false,
        }
    }
}

impl FileGenerationConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let code = ConfigIssueCode::OutOfRange {
            field: "generation.speakers_per_panel".to_string(),
            value: self.speakers_per_panel.to_string(),
        };
        if self.speakers_per_panel == 0 {
            vec![ConfigIssue::error(
                code,
                "generation.speakers_per_panel must be at least 1",
            )]
        } else if self.speakers_per_panel > MAX_SPEAKERS_PER_PANEL {
            vec![ConfigIssue::warning(
                code,
                format!(
                    "generation.speakers_per_panel = {} is unusually large",
                    self.speakers_per_panel
                ),
            )]
        } else {
            Vec::new()
        }
    }
}
