//! Workflow configuration from TOML (`[workflow]` section)

use agenda_domain::{ConfigIssue, ConfigIssueCode, ConfirmationSync};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    /// Where the agenda state is kept between invocations
    pub state_file: String,
    /// "patch" or "reload"
    pub confirmation_sync: String,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self {
            state_file: "agenda-state.json".to_string(),
            confirmation_sync: ConfirmationSync::default().as_str().to_string(),
        }
    }
}

impl FileWorkflowConfig {
    /// Parse `confirmation_sync`, falling back to the default with a warning.
    pub fn parse_confirmation_sync(&self) -> (ConfirmationSync, Vec<ConfigIssue>) {
        match self.confirmation_sync.parse() {
            Ok(sync) => (sync, Vec::new()),
            Err(_) => (
                ConfirmationSync::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "workflow.confirmation_sync".to_string(),
                        value: self.confirmation_sync.clone(),
                        valid_values: vec!["patch".to_string(), "reload".to_string()],
                    },
                    format!(
                        "workflow.confirmation_sync: unknown value '{}', falling back to 'patch'",
                        self.confirmation_sync
                    ),
                )],
            ),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_confirmation_sync().1;
        if self.state_file.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "workflow.state_file".to_string(),
                },
                "workflow.state_file must not be empty",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confirmation_sync() {
        let config = FileWorkflowConfig {
            confirmation_sync: "Reload".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_confirmation_sync(), (ConfirmationSync::Reload, vec![]));
    }

    #[test]
    fn test_unknown_confirmation_sync_falls_back() {
        let config = FileWorkflowConfig {
            confirmation_sync: "sometimes".to_string(),
            ..Default::default()
        };
        let (sync, issues) = config.parse_confirmation_sync();
        assert_eq!(sync, ConfirmationSync::Patch);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
