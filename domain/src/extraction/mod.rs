//! Text extraction from model output.
//!
//! Generative text drifts in format from call to call, so these functions
//! are total: malformed input yields an empty or partial list, never an
//! error. Final acceptance is the validator's job
//! ([`crate::validation`]).
//!
//! | Function | Accepts |
//! |----------|---------|
//! | [`extract_speakers`] | JSON array (or `{"speakers": [...]}`), else `Speaker N: Name – Title` blocks |
//! | [`extract_panels`] | JSON array (or `{"panels": [...]}`), else `Panel N: Topic – Justification` lines |

mod json;
mod panels;
mod speakers;

pub use panels::extract_panels;
pub use speakers::extract_speakers;

/// Separators accepted between a header's two halves.
///
/// The en-dash is what the prompts ask for; models sometimes answer with an
/// em-dash or a spaced hyphen instead.
const SEPARATORS: [&str; 3] = ["\u{2013}", "\u{2014}", " - "];

/// Split `rest` at the first header separator into trimmed halves.
fn split_header(rest: &str) -> (String, Option<String>) {
    let found = SEPARATORS
        .iter()
        .filter_map(|sep| rest.find(sep).map(|idx| (idx, sep.len())))
        .min_by_key(|(idx, _)| *idx);

    match found {
        Some((idx, len)) => {
            let left = rest[..idx].trim().to_string();
            let right = rest[idx + len..].trim();
            let right = if right.is_empty() {
                None
            } else {
                Some(right.to_string())
            };
            (left, right)
        }
        None => (rest.trim().to_string(), None),
    }
}

/// Match `<label> <digits>:` at the start of `line` (label case-insensitive).
///
/// Returns the parsed number and the text after the colon.
fn match_numbered_label<'a>(line: &'a str, label: &str) -> Option<(u32, &'a str)> {
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let after_label = line[label.len()..].trim_start();
    let digits_end = after_label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_label.len());
    if digits_end == 0 {
        return None;
    }
    let number = after_label[..digits_end].parse().ok()?;
    let rest = after_label[digits_end..].trim_start().strip_prefix(':')?;
    Some((number, rest))
}

/// Match `<label>:` at the start of `line` (label case-insensitive).
fn match_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    line[label.len()..].trim_start().strip_prefix(':').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_header_prefers_first_separator() {
        assert_eq!(
            split_header("Ada Lovelace \u{2013} Analyst - Engine"),
            ("Ada Lovelace".to_string(), Some("Analyst - Engine".to_string()))
        );
        assert_eq!(split_header("Jean-Luc"), ("Jean-Luc".to_string(), None));
    }

    #[test]
    fn test_match_numbered_label() {
        assert_eq!(match_numbered_label("SPEAKER 12: x", "speaker"), Some((12, " x")));
        assert_eq!(match_numbered_label("Speaker: x", "speaker"), None);
        assert_eq!(match_numbered_label("Speaker 1 x", "speaker"), None);
        assert_eq!(match_numbered_label("Sp", "speaker"), None);
    }

    #[test]
    fn test_match_label() {
        assert_eq!(match_label("bio: hello ", "Bio"), Some("hello"));
        assert_eq!(match_label("Biography: hello", "Bio"), None);
    }
}
