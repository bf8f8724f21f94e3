//! Application layer for agenda-forge
//!
//! This crate contains the workflow store, the generation coordinator use
//! case, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;
pub mod workflow;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    generation::{CompletionOptions, GenerationProvider, ProviderError},
    generation_log::{GenerationEvent, GenerationLogger, NoGenerationLogger},
    progress::{GenerationStage, NoProgress, ProgressNotifier},
    repository::{AgendaRepository, NoPersistence, RepositoryError},
    search::{NoSearch, SearchProvider},
};
pub use use_cases::coordinator::{
    CoordinatorError, GenerationCoordinator, PanelFailure, SpeakerGenerationReport,
};
pub use workflow::{AgendaSnapshot, StoreError, WorkflowStore};
