//! Record validation: the acceptance gate between extraction and the store.
//!
//! Drafts whose identifying field is empty are rejected with a reason;
//! everything else is normalized and given deterministic defaults.

use crate::agenda::draft::{
    DEFAULT_BIO, DEFAULT_TITLE, PanelDraft, PanelTopic, SpeakerDraft, SpeakerProfile,
};
use crate::core::string::non_empty;

/// Why a draft was not accepted. Logged by callers, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub reason: String,
}

impl Rejected {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rejected: {}", self.reason)
    }
}

/// Validate a speaker draft.
///
/// Rejects a draft with no name. Title and bio fall back to stock text,
/// expertise tags are trimmed and de-duplicated (case-insensitively,
/// first spelling wins), optional links are dropped when blank.
pub fn validate_speaker(draft: SpeakerDraft) -> Result<SpeakerProfile, Rejected> {
    let Some(name) = non_empty(&draft.name) else {
        return Err(Rejected::new("speaker has no name"));
    };

    let mut expertise: Vec<String> = Vec::with_capacity(draft.expertise.len());
    for tag in draft.expertise.iter().filter_map(|t| non_empty(t)) {
        if !expertise.iter().any(|e| e.eq_ignore_ascii_case(&tag)) {
            expertise.push(tag);
        }
    }

    Ok(SpeakerProfile {
        name,
        title: draft
            .title
            .as_deref()
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        expertise,
        bio: non_empty(&draft.bio).unwrap_or_else(|| DEFAULT_BIO.to_string()),
        linked_in: draft.linked_in.as_deref().and_then(non_empty),
        twitter: draft.twitter.as_deref().and_then(non_empty),
        image_url: draft.image_url.as_deref().and_then(non_empty),
    })
}

/// Validate a panel draft.
///
/// Rejects a draft with neither a topic nor a panel number, and a draft
/// numbered `0`. A numbered draft without a topic is titled `Panel N` so
/// the topic stays non-empty.
pub fn validate_panel(draft: PanelDraft) -> Result<PanelTopic, Rejected> {
    let topic = non_empty(&draft.suggested_topic);

    if draft.panel_number == Some(0) {
        return Err(Rejected::new("panel number must be positive"));
    }

    let suggested_topic = match (topic, draft.panel_number) {
        (Some(topic), _) => topic,
        (None, Some(number)) => format!("Panel {}", number),
        (None, None) => return Err(Rejected::new("panel has neither topic nor number")),
    };

    Ok(PanelTopic {
        id: draft.id.as_deref().and_then(non_empty),
        panel_number: draft.panel_number,
        suggested_topic,
        justification: draft.justification.trim().to_string(),
    })
}

/// Validate a batch of speaker drafts, returning the accepted profiles and
/// the rejections (with the draft's position) for logging.
pub fn validate_speakers(
    drafts: Vec<SpeakerDraft>,
) -> (Vec<SpeakerProfile>, Vec<(usize, Rejected)>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (index, draft) in drafts.into_iter().enumerate() {
        match validate_speaker(draft) {
            Ok(profile) => accepted.push(profile),
            Err(reason) => rejected.push((index, reason)),
        }
    }
    (accepted, rejected)
}

/// Panel counterpart of [`validate_speakers`].
pub fn validate_panels(drafts: Vec<PanelDraft>) -> (Vec<PanelTopic>, Vec<(usize, Rejected)>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (index, draft) in drafts.into_iter().enumerate() {
        match validate_panel(draft) {
            Ok(topic) => accepted.push(topic),
            Err(reason) => rejected.push((index, reason)),
        }
    }
    (accepted, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_without_name_is_rejected() {
        let result = validate_speaker(SpeakerDraft::new("   "));
        assert_eq!(result.unwrap_err().reason, "speaker has no name");
    }

    #[test]
    fn test_speaker_defaults() {
        let mut draft = SpeakerDraft::new(" Ada ");
        draft.title = Some("  ".to_string());
        draft.linked_in = Some("".to_string());
        let profile = validate_speaker(draft).unwrap();

        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.title, DEFAULT_TITLE);
        assert_eq!(profile.bio, DEFAULT_BIO);
        assert!(profile.expertise.is_empty());
        assert_eq!(profile.linked_in, None);
    }

    #[test]
    fn test_expertise_is_deduplicated_in_order() {
        let mut draft = SpeakerDraft::new("Ada");
        draft.expertise = vec!["Rust".into(), " rust ".into(), "".into(), "Go".into()];
        let profile = validate_speaker(draft).unwrap();
        assert_eq!(profile.expertise, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_panel_rules() {
        let missing = PanelDraft::default();
        assert!(validate_panel(missing).is_err());

        let zero = PanelDraft {
            panel_number: Some(0),
            suggested_topic: "Topic".into(),
            ..Default::default()
        };
        assert!(validate_panel(zero).is_err());

        let numbered_only = PanelDraft {
            panel_number: Some(4),
            ..Default::default()
        };
        assert_eq!(validate_panel(numbered_only).unwrap().suggested_topic, "Panel 4");

        let topic_only = PanelDraft {
            suggested_topic: " Testing ".into(),
            justification: " why ".into(),
            ..Default::default()
        };
        let topic = validate_panel(topic_only).unwrap();
        assert_eq!(topic.panel_number, None);
        assert_eq!(topic.suggested_topic, "Testing");
        assert_eq!(topic.justification, "why");
    }

    #[test]
    fn test_batch_validation_reports_positions() {
        let drafts = vec![SpeakerDraft::new("Ada"), SpeakerDraft::new(""), SpeakerDraft::new("Grace")];
        let (accepted, rejected) = validate_speakers(drafts);
        assert_eq!(accepted.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, 1);
    }
}
