//! Configuration file loading for agenda-forge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./agenda.toml` or `./.agenda.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/agenda-forge/config.toml`
//! 4. Fallback: `~/.config/agenda-forge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_OPENROUTER_URL, DEFAULT_SERPAPI_URL, FileConfig, FileGenerationConfig,
    FileLoggingConfig, FileOutputConfig, FileProviderConfig, FileSearchConfig,
    FileWorkflowConfig,
};
pub use loader::{ConfigError, ConfigLoader};
