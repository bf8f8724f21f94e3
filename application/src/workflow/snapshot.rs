//! Serializable form of the workflow state.

use agenda_domain::{EventBrief, Panel, PanelId, PanelStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything needed to rebuild a [`WorkflowStore`](super::WorkflowStore).
///
/// In-flight bookkeeping (running generations, applied batches) is
/// process-local and deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaSnapshot {
    #[serde(default)]
    pub brief: Option<EventBrief>,
    #[serde(default)]
    pub panels: Vec<Panel>,
    /// Last panel sequence number handed out.
    #[serde(default)]
    pub panel_seq: u64,
    /// Last speaker sequence number handed out, per panel.
    #[serde(default)]
    pub speaker_seq: BTreeMap<PanelId, u64>,
    /// Last batch number handed out.
    #[serde(default)]
    pub batch_seq: u64,
}

impl AgendaSnapshot {
    /// Prepare a snapshot loaded at startup: no regeneration can still be
    /// running, so `regenerating` panels fall back to `draft`.
    pub fn into_recovered(mut self) -> Self {
        for panel in &mut self.panels {
            if panel.status == PanelStatus::Regenerating {
                panel.status = PanelStatus::Draft;
            }
        }
        self
    }
}
