//! Domain layer for agenda-forge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Extract → Validate
//!
//! Model output is turned into records in two stages:
//!
//! - **Extraction** ([`extraction`]): lenient, total parsing of JSON or
//!   line-oriented text into drafts
//! - **Validation** ([`validation`]): rejects drafts missing their
//!   identifying field and fills deterministic defaults
//!
//! ## Agenda
//!
//! A [`Panel`] owns an ordered list of [`Speaker`]s. The
//! [`AgendaAssembler`] projects the confirmed subset for export.

pub mod agenda;
pub mod config;
pub mod core;
pub mod export;
pub mod extraction;
pub mod prompt;
pub mod research;
pub mod validation;

// Re-export commonly used types
pub use agenda::{
    BatchId, Panel, PanelDraft, PanelId, PanelStatus, PanelTopic, Speaker, SpeakerDraft,
    SpeakerId, SpeakerProfile,
};
pub use config::{ConfigIssue, ConfigIssueCode, ConfirmationSync, OutputFormat, Severity};
pub use core::{brief::EventBrief, error::DomainError};
pub use export::{AgendaAssembler, ExportRow, PanelExport, ReadinessReport};
pub use extraction::{extract_panels, extract_speakers};
pub use prompt::{PromptTemplate, ResponseSchema};
pub use research::SearchHit;
pub use validation::{Rejected, validate_panel, validate_panels, validate_speaker, validate_speakers};
