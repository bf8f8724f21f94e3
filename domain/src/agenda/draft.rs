//! Extracted candidates and their validated forms.

use serde::{Deserialize, Serialize};

/// Title used when the source names no title.
pub const DEFAULT_TITLE: &str = "Industry Expert";

/// Bio used when the source carries no bio at all.
pub const DEFAULT_BIO: &str = "Experienced professional with deep expertise in this field.";

/// A panel candidate as read from model output; nothing is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelDraft {
    pub id: Option<String>,
    pub panel_number: Option<u32>,
    pub suggested_topic: String,
    pub justification: String,
}

/// A speaker candidate as read from model output.
///
/// The extractor has already applied the bio/expertise defaults; the
/// remaining fields are exactly what the source said.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerDraft {
    pub name: String,
    pub title: Option<String>,
    pub expertise: Vec<String>,
    pub bio: String,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub image_url: Option<String>,
}

impl SpeakerDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Validated panel topic fields, not yet placed in an agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelTopic {
    pub id: Option<String>,
    /// `None` when the source gave no number; the store assigns one.
    pub panel_number: Option<u32>,
    pub suggested_topic: String,
    pub justification: String,
}

/// Validated speaker fields: every mutable attribute of a [`Speaker`](super::Speaker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerProfile {
    pub name: String,
    pub title: String,
    pub expertise: Vec<String>,
    pub bio: String,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub image_url: Option<String>,
}
