//! Agenda domain: panels, speakers and their extracted drafts.
//!
//! # Lifecycle
//!
//! ```text
//! Panel:    draft ──confirm──▶ confirmed
//!             ▲  ╲                 │
//!             │   regenerate       │ regenerate
//!             │     ▼              ▼
//!             └── regenerating ◀───┘   (cleared by the initiating operation)
//!
//! Speaker:  unconfirmed ◀──▶ confirmed    (regeneration always resets to unconfirmed)
//! ```
//!
//! A [`Panel`] exclusively owns its [`Speaker`]s. Drafts ([`PanelDraft`],
//! [`SpeakerDraft`]) are what the extractor produces; the validator turns
//! them into [`PanelTopic`] / [`SpeakerProfile`], which carry no identity
//! until the workflow store assigns one.

pub mod draft;
pub mod entities;
pub mod value_objects;

pub use draft::{PanelDraft, PanelTopic, SpeakerDraft, SpeakerProfile};
pub use entities::{Panel, PanelStatus, Speaker};
pub use value_objects::{BatchId, PanelId, SpeakerId};
