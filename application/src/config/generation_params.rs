//! Generation parameters: coordinator behaviour.
//!
//! These are application-layer concerns, not domain policy: how many
//! speakers to ask for, whether to request structured output, and how the
//! store is refreshed after a persisted mutation.

use agenda_domain::ConfirmationSync;
use serde::{Deserialize, Serialize};

/// Parameters for [`GenerationCoordinator`](crate::use_cases::coordinator::GenerationCoordinator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Speakers requested per panel in a fan-out.
    pub speakers_per_panel: usize,
    /// Attach a JSON schema to every request.
    pub structured_output: bool,
    /// Search hits passed to the model as references.
    pub max_references: usize,
    /// What happens to the in-memory store after each save.
    pub confirmation_sync: ConfirmationSync,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            speakers_per_panel: 3,
            structured_output: false,
            max_references: 5,
            confirmation_sync: ConfirmationSync::default(),
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_speakers_per_panel(mut self, count: usize) -> Self {
        self.speakers_per_panel = count;
        self
    }

    pub fn with_structured_output(mut self, enabled: bool) -> Self {
        self.structured_output = enabled;
        self
    }

    pub fn with_max_references(mut self, max: usize) -> Self {
        self.max_references = max;
        self
    }

    pub fn with_confirmation_sync(mut self, sync: ConfirmationSync) -> Self {
        self.confirmation_sync = sync;
        self
    }
}
