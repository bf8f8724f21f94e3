//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the rolling daily log file; none when unset
    pub dir: Option<String>,
    /// Path of the JSONL generation log; none when unset
    pub generation_log: Option<String>,
}
