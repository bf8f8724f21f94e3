//! Type definitions for the generation coordinator.

use crate::ports::generation::ProviderError;
use crate::ports::repository::RepositoryError;
use crate::workflow::StoreError;
use agenda_domain::PanelId;
use thiserror::Error;

/// Errors that can occur during a coordinated generation
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("No event brief recorded; generate topics first")]
    NoBrief,

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Generated text contained no valid {0}")]
    ExtractionEmpty(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Persistence error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Generation task failed: {0}")]
    TaskFailed(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl CoordinatorError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoordinatorError::Cancelled)
    }

    /// A rejected no-op: the target was already being worked on, or the
    /// transition is not allowed from its current state.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoordinatorError::Store(e) if e.is_conflict())
    }
}

/// A panel whose speaker generation did not attach anything.
#[derive(Debug)]
pub struct PanelFailure {
    pub panel_id: PanelId,
    pub error: CoordinatorError,
}

/// Outcome of a speaker fan-out, one entry per requested panel.
#[derive(Debug, Default)]
pub struct SpeakerGenerationReport {
    /// Panels that received speakers, with the number attached.
    pub succeeded: Vec<(PanelId, usize)>,
    pub failed: Vec<PanelFailure>,
}

impl SpeakerGenerationReport {
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn speakers_attached(&self) -> usize {
        self.succeeded.iter().map(|(_, n)| n).sum()
    }

    pub fn failure_for(&self, panel_id: &PanelId) -> Option<&CoordinatorError> {
        self.failed
            .iter()
            .find(|f| &f.panel_id == panel_id)
            .map(|f| &f.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report = SpeakerGenerationReport {
            succeeded: vec![(PanelId::new("panel-1"), 3), (PanelId::new("panel-3"), 2)],
            failed: vec![PanelFailure {
                panel_id: PanelId::new("panel-2"),
                error: CoordinatorError::Provider(ProviderError::Timeout),
            }],
        };
        assert_eq!(report.failure_count(), 1);
        assert!(!report.is_complete());
        assert_eq!(report.speakers_attached(), 5);
        assert!(report.failure_for(&PanelId::new("panel-2")).is_some());
        assert!(report.failure_for(&PanelId::new("panel-1")).is_none());
    }

    #[test]
    fn test_conflict_detection() {
        let conflict = CoordinatorError::Store(StoreError::TransitionConflict("busy".into()));
        assert!(conflict.is_conflict());
        assert!(!CoordinatorError::Cancelled.is_conflict());
        assert!(CoordinatorError::Cancelled.is_cancelled());
    }
}
