//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod generation;
pub mod generation_log;
pub mod progress;
pub mod repository;
pub mod search;
