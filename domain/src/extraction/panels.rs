//! Panel topic extraction.

use super::json::{number_field, parse_record_array, string_field};
use super::{match_numbered_label, split_header};
use crate::agenda::draft::PanelDraft;
use crate::core::string::strip_markup;
use serde_json::Value;

/// Extract panel candidates from model output.
///
/// A JSON array (or `{"panels": [...]}`) maps element-wise; otherwise every
/// `Panel N: Topic – Justification` line yields one draft and all other
/// lines are ignored.
pub fn extract_panels(text: &str) -> Vec<PanelDraft> {
    if let Some(items) = parse_record_array(text, "panels") {
        return items.iter().filter_map(panel_from_json).collect();
    }

    text.lines()
        .filter_map(|raw| {
            let line = strip_markup(raw);
            let (number, rest) = match_numbered_label(&line, "panel")?;
            let (topic, justification) = split_header(rest);
            Some(PanelDraft {
                id: None,
                panel_number: Some(number),
                suggested_topic: topic,
                justification: justification.unwrap_or_default(),
            })
        })
        .collect()
}

fn panel_from_json(item: &Value) -> Option<PanelDraft> {
    if !item.is_object() {
        return None;
    }
    Some(PanelDraft {
        id: string_field(item, &["id"]),
        panel_number: number_field(item, &["panelNumber", "panel_number", "number"]),
        suggested_topic: string_field(item, &["suggestedTopic", "suggested_topic", "topic", "title"])
            .unwrap_or_default(),
        justification: string_field(item, &["justification", "description"]).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_panel_line() {
        let panels = extract_panels("Panel 3: AI Ethics \u{2013} Because it matters");
        assert_eq!(
            panels,
            vec![PanelDraft {
                id: None,
                panel_number: Some(3),
                suggested_topic: "AI Ethics".to_string(),
                justification: "Because it matters".to_string(),
            }]
        );
    }

    #[test]
    fn test_noise_lines_are_skipped() {
        let text = "Sure! Here are the panels for your event:

1. **Panel 1: Memory Safety at Scale \u{2013} Industry is migrating.**
Panel two: not numbered
Panel 2: Async Rust \u{2013} Everyone ships services.
Panel: missing number \u{2013} ignored

Let me know if you want changes.";
        let panels = extract_panels(text);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].suggested_topic, "Memory Safety at Scale");
        assert_eq!(panels[0].justification, "Industry is migrating.");
        assert_eq!(panels[1].panel_number, Some(2));
        assert_eq!(panels[1].suggested_topic, "Async Rust");
    }

    #[test]
    fn test_bulleted_and_dashed_variants() {
        let text = "- Panel 1: Memory Safety \u{2014} Industry is migrating
## Panel 2: Embedded - Microcontrollers everywhere
Panel 3: Tooling";
        let panels = extract_panels(text);
        assert_eq!(panels.len(), 3);
        assert_eq!(panels[0].justification, "Industry is migrating");
        assert_eq!(panels[1].suggested_topic, "Embedded");
        assert_eq!(panels[2].suggested_topic, "Tooling");
        assert_eq!(panels[2].justification, "");
    }

    #[test]
    fn test_json_panels() {
        let text = r#"{"panels": [
            {"panelNumber": 1, "suggestedTopic": "Compilers", "justification": "Fast builds"},
            {"panel_number": "2", "topic": "Testing"},
            "junk"
        ]}"#;
        let panels = extract_panels(text);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].suggested_topic, "Compilers");
        assert_eq!(panels[1].panel_number, Some(2));
        assert_eq!(panels[1].justification, "");
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_panels("").is_empty());
        assert!(extract_panels("no panels here").is_empty());
    }
}
