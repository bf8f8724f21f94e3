//! Final agenda projection.
//!
//! Read-only views over the panel collection: the confirmed-only agenda,
//! the flat row table used for tabular export, and stage readiness checks.

use crate::agenda::{Panel, PanelId, PanelStatus, Speaker};
use serde::{Deserialize, Serialize};

/// A panel as it appears in the final agenda: confirmed speakers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelExport {
    pub id: PanelId,
    pub panel_number: u32,
    pub suggested_topic: String,
    pub justification: String,
    pub speakers: Vec<Speaker>,
}

/// One row of the flat export table.
///
/// Speaker columns are empty strings on the placeholder row of a confirmed
/// panel that has no confirmed speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub panel_id: String,
    pub panel_number: u32,
    pub panel_topic: String,
    pub justification: String,
    pub speaker_name: String,
    pub speaker_title: String,
    pub speaker_bio: String,
    pub speaker_expertise: String,
    pub speaker_linked_in: String,
    pub speaker_confirmed: String,
}

impl ExportRow {
    /// Column headers in field order.
    pub const HEADERS: [&'static str; 10] = [
        "Panel ID",
        "Panel Number",
        "Panel Topic",
        "Justification",
        "Speaker Name",
        "Speaker Title",
        "Speaker Bio",
        "Speaker Expertise",
        "Speaker LinkedIn",
        "Speaker Confirmed",
    ];

    fn panel_only(panel: &Panel) -> Self {
        Self {
            panel_id: panel.id.to_string(),
            panel_number: panel.panel_number,
            panel_topic: panel.suggested_topic.clone(),
            justification: panel.justification.clone(),
            speaker_name: String::new(),
            speaker_title: String::new(),
            speaker_bio: String::new(),
            speaker_expertise: String::new(),
            speaker_linked_in: String::new(),
            speaker_confirmed: String::new(),
        }
    }

    fn with_speaker(panel: &Panel, speaker: &Speaker) -> Self {
        Self {
            speaker_name: speaker.name.clone(),
            speaker_title: speaker.title.clone(),
            speaker_bio: speaker.bio.clone(),
            speaker_expertise: speaker.expertise_label(),
            speaker_linked_in: speaker.linked_in.clone().unwrap_or_default(),
            speaker_confirmed: if speaker.confirmed { "Yes" } else { "" }.to_string(),
            ..Self::panel_only(panel)
        }
    }

    /// Field values in header order.
    pub fn fields(&self) -> [String; 10] {
        [
            self.panel_id.clone(),
            self.panel_number.to_string(),
            self.panel_topic.clone(),
            self.justification.clone(),
            self.speaker_name.clone(),
            self.speaker_title.clone(),
            self.speaker_bio.clone(),
            self.speaker_expertise.clone(),
            self.speaker_linked_in.clone(),
            self.speaker_confirmed.clone(),
        ]
    }
}

/// Panels still blocking progression to the next stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadinessReport {
    /// Panels that block progression, in panel order.
    pub blocking: Vec<PanelId>,
    /// False when there is nothing to progress with at all.
    pub has_candidates: bool,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.has_candidates && self.blocking.is_empty()
    }
}

/// Projects the workflow state into the final agenda.
pub struct AgendaAssembler;

impl AgendaAssembler {
    /// Panels with at least one confirmed speaker, each reduced to its
    /// confirmed speakers in insertion order, sorted by panel number.
    pub fn finalize(panels: &[Panel]) -> Vec<PanelExport> {
        let mut exports: Vec<PanelExport> = panels
            .iter()
            .filter(|p| p.has_confirmed_speaker())
            .map(|p| PanelExport {
                id: p.id.clone(),
                panel_number: p.panel_number,
                suggested_topic: p.suggested_topic.clone(),
                justification: p.justification.clone(),
                speakers: p.confirmed_speakers().cloned().collect(),
            })
            .collect();
        exports.sort_by_key(|p| p.panel_number);
        exports
    }

    /// Flat rows: one per (panel, confirmed speaker) pair.
    ///
    /// A panel takes part when its topic is confirmed or it has a confirmed
    /// speaker; a confirmed panel with no confirmed speaker still yields a
    /// single row with empty speaker columns.
    pub fn rows(panels: &[Panel]) -> Vec<ExportRow> {
        let mut ordered: Vec<&Panel> = panels
            .iter()
            .filter(|p| p.is_confirmed() || p.has_confirmed_speaker())
            .collect();
        ordered.sort_by_key(|p| p.panel_number);

        let mut rows = Vec::new();
        for panel in ordered {
            let before = rows.len();
            rows.extend(
                panel
                    .confirmed_speakers()
                    .map(|s| ExportRow::with_speaker(panel, s)),
            );
            if rows.len() == before {
                rows.push(ExportRow::panel_only(panel));
            }
        }
        rows
    }

    /// Topic stage gate: at least one panel must be confirmed.
    pub fn topics_ready(panels: &[Panel]) -> ReadinessReport {
        ReadinessReport {
            blocking: panels
                .iter()
                .filter(|p| p.status == PanelStatus::Regenerating)
                .map(|p| p.id.clone())
                .collect(),
            has_candidates: panels.iter().any(Panel::is_confirmed),
        }
    }

    /// Speaker stage gate: every confirmed panel needs a confirmed speaker.
    pub fn speakers_ready(panels: &[Panel]) -> ReadinessReport {
        let mut confirmed: Vec<&Panel> = panels.iter().filter(|p| p.is_confirmed()).collect();
        confirmed.sort_by_key(|p| p.panel_number);
        ReadinessReport {
            blocking: confirmed
                .iter()
                .filter(|p| !p.has_confirmed_speaker())
                .map(|p| p.id.clone())
                .collect(),
            has_candidates: !confirmed.is_empty(),
        }
    }
}
