//! Core domain concepts shared across all subdomains.
//!
//! - [`brief::EventBrief`]: the validated event description topics are generated from
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: small text helpers used by extraction and logging

pub mod brief;
pub mod error;
pub mod string;
