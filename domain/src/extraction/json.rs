//! JSON payload detection shared by the speaker and panel extractors.

use serde_json::Value;

/// Parse `text` as a JSON list of records.
///
/// Accepts a bare array, an object wrapping the array under `key` (the
/// shape structured-output schemas produce), and either of those inside a
/// single fenced code block. Anything else is `None`.
pub(super) fn parse_record_array(text: &str, key: &str) -> Option<Vec<Value>> {
    let trimmed = unfence(text.trim());
    match serde_json::from_str::<Value>(trimmed).ok()? {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// First non-blank string among `keys`, returned as written.
pub(super) fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    })
}

/// Positive integer among `keys`, accepting numbers and numeric strings.
pub(super) fn number_field(value: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| match value.get(*key) {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// String list among `keys`; a comma-separated string also counts.
pub(super) fn list_field(value: &Value, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter().find_map(|key| match value.get(*key) {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Some(Value::String(s)) => Some(super::speakers::split_list(s)),
        _ => None,
    })
}

fn unfence(text: &str) -> &str {
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = body.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    match body.find('\n') {
        Some(idx) => body[idx + 1..].trim(),
        None => body.trim(),
    }
}
