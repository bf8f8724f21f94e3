//! Event brief value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upper bound on panels requested in a single topic generation.
pub const MAX_PANELS: usize = 20;

/// The organizer's description of an event (Value Object)
///
/// Every topic generation starts from a brief, and topic regeneration
/// reuses the brief of the agenda it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBrief {
    event_name: String,
    main_topic: String,
    #[serde(default)]
    additional_info: String,
    number_of_panels: usize,
}

impl EventBrief {
    /// Create a validated brief.
    ///
    /// Event name and main topic are trimmed and must be non-empty;
    /// the panel count must be within `1..=MAX_PANELS`.
    pub fn new(
        event_name: impl Into<String>,
        main_topic: impl Into<String>,
        additional_info: impl Into<String>,
        number_of_panels: usize,
    ) -> Result<Self, DomainError> {
        let event_name = event_name.into().trim().to_string();
        let main_topic = main_topic.into().trim().to_string();

        if event_name.is_empty() {
            return Err(DomainError::EmptyEventName);
        }
        if main_topic.is_empty() {
            return Err(DomainError::EmptyMainTopic);
        }
        if number_of_panels == 0 || number_of_panels > MAX_PANELS {
            return Err(DomainError::InvalidPanelCount {
                got: number_of_panels,
                max: MAX_PANELS,
            });
        }

        Ok(Self {
            event_name,
            main_topic,
            additional_info: additional_info.into().trim().to_string(),
            number_of_panels,
        })
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn main_topic(&self) -> &str {
        &self.main_topic
    }

    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }

    pub fn number_of_panels(&self) -> usize {
        self.number_of_panels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_trims_fields() {
        let brief = EventBrief::new("  DevConf ", " Rust in production ", "", 3).unwrap();
        assert_eq!(brief.event_name(), "DevConf");
        assert_eq!(brief.main_topic(), "Rust in production");
        assert_eq!(brief.number_of_panels(), 3);
    }

    #[test]
    fn test_brief_rejects_empty_fields() {
        assert_eq!(
            EventBrief::new("   ", "Topic", "", 3),
            Err(DomainError::EmptyEventName)
        );
        assert_eq!(
            EventBrief::new("Event", "", "", 3),
            Err(DomainError::EmptyMainTopic)
        );
    }

    #[test]
    fn test_brief_panel_count_bounds() {
        assert!(EventBrief::new("Event", "Topic", "", 0).is_err());
        assert!(EventBrief::new("Event", "Topic", "", MAX_PANELS + 1).is_err());
        assert!(EventBrief::new("Event", "Topic", "", MAX_PANELS).is_ok());
    }

    #[test]
    fn test_brief_serde_camel_case() {
        let brief = EventBrief::new("Event", "Topic", "Extra", 2).unwrap();
        let json = serde_json::to_value(&brief).unwrap();
        assert_eq!(json["eventName"], "Event");
        assert_eq!(json["numberOfPanels"], 2);
    }
}
