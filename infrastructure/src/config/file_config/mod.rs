//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod logging;
mod output;
mod provider;
mod search;
mod workflow;

pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::{DEFAULT_OPENROUTER_URL, FileProviderConfig};
pub use search::{DEFAULT_SERPAPI_URL, FileSearchConfig};
pub use workflow::FileWorkflowConfig;

use agenda_application::GenerationParams;
use agenda_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// OpenRouter generation settings
    pub provider: FileProviderConfig,
    /// SerpAPI search settings
    pub search: FileSearchConfig,
    /// Generation request settings
    pub generation: FileGenerationConfig,
    /// State file and confirmation sync
    pub workflow: FileWorkflowConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings come with a
    /// fallback that is applied by the accessors below.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.provider.validate());
        issues.extend(self.search.validate());
        issues.extend(self.generation.validate());
        issues.extend(self.workflow.validate());
        issues
    }

    /// Coordinator parameters derived from `[generation]`, `[search]` and `[workflow]`.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_speakers_per_panel(self.generation.speakers_per_panel)
            .with_structured_output(self.generation.structured_output)
            .with_max_references(if self.search.enabled {
                self.search.max_results
            } else {
                0
            })
            .with_confirmation_sync(self.workflow.parse_confirmation_sync().0)
    }
}
