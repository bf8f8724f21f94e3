//! Web search results used as grounding for speaker generation.

use crate::agenda::draft::SpeakerDraft;
use serde::{Deserialize, Serialize};

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }

    fn is_linkedin_profile(&self) -> bool {
        self.link.contains("linkedin.com/in/")
    }
}

/// Query used to look up candidate speakers for a topic.
pub fn speaker_query(topic: &str) -> String {
    format!("{} expert speaker", topic.trim())
}

/// Fill a missing LinkedIn link from a profile hit whose title names the speaker.
pub fn attach_profile_links(draft: &mut SpeakerDraft, hits: &[SearchHit]) {
    if draft.linked_in.is_some() {
        return;
    }
    let name = draft.name.trim().to_lowercase();
    if name.is_empty() {
        return;
    }
    draft.linked_in = hits
        .iter()
        .find(|hit| hit.is_linkedin_profile() && hit.title.to_lowercase().contains(&name))
        .map(|hit| hit.link.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_profile_links_matches_name() {
        let hits = vec![
            SearchHit::new("Rust conference 2025", "https://example.com"),
            SearchHit::new("Ada Lovelace - CTO - LinkedIn", "https://www.linkedin.com/in/ada"),
        ];
        let mut draft = SpeakerDraft::new("Ada Lovelace");
        attach_profile_links(&mut draft, &hits);
        assert_eq!(draft.linked_in.as_deref(), Some("https://www.linkedin.com/in/ada"));

        let mut other = SpeakerDraft::new("Grace Hopper");
        attach_profile_links(&mut other, &hits);
        assert_eq!(other.linked_in, None);
    }

    #[test]
    fn test_existing_link_is_kept() {
        let hits = vec![SearchHit::new("Ada", "https://www.linkedin.com/in/other")];
        let mut draft = SpeakerDraft::new("Ada");
        draft.linked_in = Some("https://linkedin.com/in/ada".to_string());
        attach_profile_links(&mut draft, &hits);
        assert_eq!(draft.linked_in.as_deref(), Some("https://linkedin.com/in/ada"));
    }
}
