//! Workflow store errors

use agenda_domain::{PanelId, SpeakerId};
use thiserror::Error;

/// Errors returned by [`WorkflowStore`](super::WorkflowStore) operations.
///
/// Every error leaves the store unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Panel not found: {0}")]
    PanelNotFound(PanelId),

    #[error("Speaker {speaker} not found on panel {panel}")]
    SpeakerNotFound { panel: PanelId, speaker: SpeakerId },

    #[error("Transition conflict: {0}")]
    TransitionConflict(String),
}

impl StoreError {
    /// A rejected no-op rather than a missing entity.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::TransitionConflict(_))
    }
}
