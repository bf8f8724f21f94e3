//! Structured-output schemas

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A named JSON schema a provider can be asked to conform to.
///
/// The top level is always an object wrapping the record array, which is
/// the shape the extractor accepts alongside a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: Value,
}

impl ResponseSchema {
    /// `{"panels": [{panelNumber, suggestedTopic, justification}]}`
    pub fn panels() -> Self {
        Self {
            name: "panels".to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "panels": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "panelNumber": { "type": "integer" },
                                "suggestedTopic": { "type": "string" },
                                "justification": { "type": "string" }
                            },
                            "required": ["panelNumber", "suggestedTopic", "justification"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["panels"],
                "additionalProperties": false
            }),
        }
    }

    /// `{"speakers": [{name, title, bio, expertise, linkedIn}]}`
    pub fn speakers() -> Self {
        Self {
            name: "speakers".to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "speakers": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "title": { "type": "string" },
                                "bio": { "type": "string" },
                                "expertise": { "type": "array", "items": { "type": "string" } },
                                "linkedIn": { "type": "string" }
                            },
                            "required": ["name", "title", "bio", "expertise", "linkedIn"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["speakers"],
                "additionalProperties": false
            }),
        }
    }
}
