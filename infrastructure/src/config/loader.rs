//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use agenda_domain::ConfigIssue;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_FILES: [&str; 2] = ["agenda.toml", ".agenda.toml"];

/// Errors from loading or checking the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {}", .0.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigIssue>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./agenda.toml` or `./.agenda.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/agenda-forge/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.extract().map_err(Box::new)?)
    }

    /// Load a single file over the defaults, ignoring every other source.
    pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
        Ok(Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)?)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Split validation issues into warnings, failing on any error.
    pub fn check(config: &FileConfig) -> Result<Vec<ConfigIssue>, ConfigError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            config.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/agenda-forge/config.toml if set,
    /// otherwise falls back to ~/.config/agenda-forge/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agenda-forge").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<7}] --config: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND  ] Project: {}", path.display());
        } else {
            println!("  [       ] Project: ./agenda.toml or ./.agenda.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            println!("  [{:<7}] Global:  {}", mark, path.display());
        }

        println!("  [       ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.generation.speakers_per_panel, 3);
        assert!(config.search.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("agenda-forge"));
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[provider]\nmodel = \"openai/gpt-4o\"\n\n[search]\nmax_results = 2").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.provider.model, "openai/gpt-4o");
        assert_eq!(config.search.max_results, 2);
        assert_eq!(config.provider.api_key_env, "OPENROUTER_KEY");
    }

    #[test]
    fn test_load_file_rejects_bad_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.toml");
        std::fs::write(&path, "[generation]\nspeakers_per_panel = \"many\"\n").unwrap();

        assert!(matches!(
            ConfigLoader::load_file(&path),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_check_separates_warnings_from_errors() {
        let mut config = FileConfig::default();
        config.workflow.confirmation_sync = "later".to_string();
        let warnings = ConfigLoader::check(&config).unwrap();
        assert_eq!(warnings.len(), 1);

        config.generation.speakers_per_panel = 0;
        let err = ConfigLoader::check(&config).unwrap_err();
        assert!(err.to_string().contains("speakers_per_panel"));
    }
}
