//! Agenda domain entities

use super::draft::SpeakerProfile;
use super::value_objects::{PanelId, SpeakerId};
use serde::{Deserialize, Serialize};

/// Workflow status of a panel's topic.
///
/// `Regenerating` and `Confirmed` are distinct variants, so a panel can
/// never be both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelStatus {
    #[default]
    Draft,
    Confirmed,
    Regenerating,
}

impl PanelStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PanelStatus::Draft => "draft",
            PanelStatus::Confirmed => "confirmed",
            PanelStatus::Regenerating => "regenerating",
        }
    }
}

impl std::fmt::Display for PanelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PanelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PanelStatus::Draft),
            "confirmed" => Ok(PanelStatus::Confirmed),
            "regenerating" => Ok(PanelStatus::Regenerating),
            other => Err(format!("unknown panel status: {}", other)),
        }
    }
}

/// A person attached to a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: SpeakerId,
    pub name: String,
    pub title: String,
    /// Short expertise tags; order is kept for display only.
    pub expertise: Vec<String>,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
}

impl Speaker {
    /// Create an unconfirmed speaker from a validated profile.
    pub fn from_profile(id: SpeakerId, profile: SpeakerProfile) -> Self {
        Self {
            id,
            name: profile.name,
            title: profile.title,
            expertise: profile.expertise,
            bio: profile.bio,
            linked_in: profile.linked_in,
            twitter: profile.twitter,
            image_url: profile.image_url,
            confirmed: false,
        }
    }

    /// Overwrite every mutable field from `profile`.
    ///
    /// The id is kept and confirmation is reset, so a regenerated speaker
    /// occupies the same slot and must be confirmed again.
    pub fn replace_profile(&mut self, profile: SpeakerProfile) {
        self.name = profile.name;
        self.title = profile.title;
        self.expertise = profile.expertise;
        self.bio = profile.bio;
        self.linked_in = profile.linked_in;
        self.twitter = profile.twitter;
        self.image_url = profile.image_url;
        self.confirmed = false;
    }

    /// Expertise tags joined for single-cell display.
    pub fn expertise_label(&self) -> String {
        self.expertise.join("; ")
    }
}

/// One agenda session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: PanelId,
    pub panel_number: u32,
    pub suggested_topic: String,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub status: PanelStatus,
    /// Insertion order is generation order.
    #[serde(default)]
    pub speakers: Vec<Speaker>,
}

impl Panel {
    pub fn new(
        id: PanelId,
        panel_number: u32,
        suggested_topic: impl Into<String>,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            id,
            panel_number,
            suggested_topic: suggested_topic.into(),
            justification: justification.into(),
            status: PanelStatus::Draft,
            speakers: Vec::new(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == PanelStatus::Confirmed
    }

    pub fn is_regenerating(&self) -> bool {
        self.status == PanelStatus::Regenerating
    }

    pub fn speaker(&self, id: &SpeakerId) -> Option<&Speaker> {
        self.speakers.iter().find(|s| &s.id == id)
    }

    pub fn speaker_mut(&mut self, id: &SpeakerId) -> Option<&mut Speaker> {
        self.speakers.iter_mut().find(|s| &s.id == id)
    }

    /// Confirmed speakers in insertion order.
    pub fn confirmed_speakers(&self) -> impl Iterator<Item = &Speaker> {
        self.speakers.iter().filter(|s| s.confirmed)
    }

    pub fn has_confirmed_speaker(&self) -> bool {
        self.speakers.iter().any(|s| s.confirmed)
    }

    /// Names already on this panel, used to steer regeneration away from duplicates.
    pub fn speaker_names(&self) -> Vec<&str> {
        self.speakers.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> SpeakerProfile {
        SpeakerProfile {
            name: name.to_string(),
            title: "CTO".to_string(),
            expertise: vec!["Rust".to_string()],
            bio: "Builds things.".to_string(),
            linked_in: None,
            twitter: None,
            image_url: None,
        }
    }

    #[test]
    fn test_replace_profile_keeps_id_and_resets_confirmation() {
        let id = SpeakerId::new("p-speaker-1");
        let mut speaker = Speaker::from_profile(id.clone(), profile("Ada"));
        speaker.confirmed = true;

        speaker.replace_profile(profile("Grace"));

        assert_eq!(speaker.id, id);
        assert_eq!(speaker.name, "Grace");
        assert!(!speaker.confirmed);
    }

    #[test]
    fn test_confirmed_speakers_preserve_order() {
        let mut panel = Panel::new(PanelId::new("p"), 1, "Topic", "");
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            let mut s = Speaker::from_profile(SpeakerId::new(format!("s{}", i)), profile(name));
            s.confirmed = *name != "B";
            panel.speakers.push(s);
        }

        let names: Vec<_> = panel.confirmed_speakers().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(panel.has_confirmed_speaker());
    }

    #[test]
    fn test_panel_status_serde() {
        let json = serde_json::to_string(&PanelStatus::Regenerating).unwrap();
        assert_eq!(json, "\"regenerating\"");
        assert_eq!("Confirmed".parse::<PanelStatus>(), Ok(PanelStatus::Confirmed));
    }

    #[test]
    fn test_panel_serializes_camel_case() {
        let panel = Panel::new(PanelId::new("p"), 3, "AI Ethics", "Because it matters");
        let json = serde_json::to_value(&panel).unwrap();
        assert_eq!(json["panelNumber"], 3);
        assert_eq!(json["suggestedTopic"], "AI Ethics");
        assert_eq!(json["status"], "draft");
    }
}
