//! `[output]` section: how `finalize` renders the agenda and whether the
//! console uses ANSI colors.
//!
//! ```toml
//! [output]
//! format = "csv"   # table | json | csv
//! color = false
//! ```

use agenda_domain::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Export format used by `finalize` when no `--format` flag is passed.
    /// Unset means the table view.
    pub format: Option<OutputFormat>,
    /// `false` strips colors from every command's console output.
    pub color: bool,
}

impl FileOutputConfig {
    /// Format `finalize` falls back to without a `--format` flag.
    pub fn finalize_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;
    use super::*;

    #[test]
    fn test_csv_export_without_color() {
        let toml_str = r#"
[output]
format = "csv"
color = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.finalize_format(), OutputFormat::Csv);
        assert!(!config.output.color);
    }

    #[test]
    fn test_finalize_defaults_to_table() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.output.finalize_format(), OutputFormat::Table);
        assert!(config.output.color);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("[output]\nformat = \"pdf\"\n");
        assert!(result.is_err());
    }
}
