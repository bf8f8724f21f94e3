//! Application-level configuration.
//!
//! - [`GenerationParams`]: how the coordinator talks to providers and
//!   keeps the store in sync with persistence

pub mod generation_params;

pub use generation_params::GenerationParams;
