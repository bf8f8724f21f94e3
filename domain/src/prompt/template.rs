//! Prompt templates for agenda generation

use crate::agenda::Panel;
use crate::core::brief::EventBrief;
use crate::research::SearchHit;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt shared by every request
    pub fn system() -> &'static str {
        r#"You are an experienced conference program chair.
You design focused, non-overlapping panel sessions and recommend credible speakers for them.
Follow the requested output format exactly. Do not add commentary before or after it."#
    }

    /// Prompt for the initial set of panel topics
    pub fn topics(brief: &EventBrief) -> String {
        let mut prompt = format!(
            r#"Event: {}
Main topic: {}
"#,
            brief.event_name(),
            brief.main_topic()
        );

        if !brief.additional_info().is_empty() {
            prompt.push_str(&format!("Additional context: {}\n", brief.additional_info()));
        }

        prompt.push_str(&format!(
            r#"
Suggest {} panel discussions for this event. Write one line per panel, exactly in this form:

Panel 1: <topic> – <one-sentence justification>
Panel 2: <topic> – <one-sentence justification>

Use the en dash (–) between topic and justification."#,
            brief.number_of_panels()
        ));

        prompt
    }

    /// Prompt for a replacement topic for one panel
    pub fn regenerate_topic(brief: &EventBrief, panel: &Panel, others: &[&Panel]) -> String {
        let mut prompt = format!(
            r#"Event: {}
Main topic: {}

Panel {} currently covers "{}". Suggest one different topic for this slot.
"#,
            brief.event_name(),
            brief.main_topic(),
            panel.panel_number,
            panel.suggested_topic
        );

        if !others.is_empty() {
            prompt.push_str("\nAvoid overlapping with the other panels:\n");
            for other in others {
                prompt.push_str(&format!("- {}\n", other.suggested_topic));
            }
        }

        prompt.push_str(&format!(
            "\nAnswer with exactly one line:\n\nPanel {}: <topic> – <one-sentence justification>",
            panel.panel_number
        ));

        prompt
    }

    /// Prompt for a batch of speakers for one panel
    pub fn speakers(topic: &str, count: usize, references: &[SearchHit]) -> String {
        let mut prompt = format!(
            "Recommend {} speakers for a panel discussion on \"{}\".\n",
            count, topic
        );
        Self::push_references(&mut prompt, references);
        prompt.push_str(
            r#"
For each speaker write a block exactly in this form:

Speaker 1: <full name> – <current title and organization>
Bio: <two or three sentences>
Expertise: <comma-separated list of short areas>

Leave a blank line between speakers."#,
        );
        prompt
    }

    /// Prompt for one replacement speaker
    pub fn regenerate_speaker(
        topic: &str,
        replacing: &str,
        existing: &[&str],
        references: &[SearchHit],
    ) -> String {
        let mut prompt = format!(
            "Recommend one new speaker for a panel discussion on \"{}\" to replace {}.\n",
            topic, replacing
        );

        if !existing.is_empty() {
            prompt.push_str(&format!(
                "Do not suggest any of: {}.\n",
                existing.join(", ")
            ));
        }

        Self::push_references(&mut prompt, references);
        prompt.push_str(
            r#"
Write exactly one block in this form:

Speaker 1: <full name> – <current title and organization>
Bio: <two or three sentences>
Expertise: <comma-separated list of short areas>"#,
        );
        prompt
    }

    fn push_references(prompt: &mut String, references: &[SearchHit]) {
        if references.is_empty() {
            return;
        }
        prompt.push_str("\nWeb search results that may help:\n");
        for hit in references {
            prompt.push_str(&format!("- {} ({})\n", hit.title, hit.link));
        }
    }
}
