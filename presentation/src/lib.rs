//! Presentation layer for agenda-forge
//!
//! This crate contains CLI definitions, output formatters,
//! the CSV export writer and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, FormatArg};
pub use output::console::ConsoleFormatter;
pub use output::csv::{CsvWriter, default_filename};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
