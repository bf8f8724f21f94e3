//! Configuration value objects shared across layers.

mod confirmation_sync;
mod output_format;
pub mod validation;

pub use confirmation_sync::ConfirmationSync;
pub use output_format::OutputFormat;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
