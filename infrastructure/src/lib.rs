//! Infrastructure layer for agenda-forge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod persistence;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileOutputConfig, FileProviderConfig, FileSearchConfig, FileWorkflowConfig,
};
pub use logging::JsonlGenerationLogger;
pub use persistence::JsonFileAgendaRepository;
pub use providers::{OpenRouterProvider, SerpApiSearch, UnavailableProvider};
