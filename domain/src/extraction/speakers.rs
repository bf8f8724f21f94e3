//! Speaker extraction.

use super::json::{list_field, parse_record_array, string_field};
use super::{match_label, match_numbered_label, split_header};
use crate::agenda::draft::{DEFAULT_BIO, SpeakerDraft};
use crate::core::string::{non_empty, strip_markup};
use serde_json::Value;

/// Extract speaker candidates from model output.
///
/// 1. If the whole input is a JSON array (or an object wrapping one under
///    `speakers`), each element maps straight to a draft and the text path
///    is skipped entirely.
/// 2. Otherwise the input is read line by line:
///    - `Speaker N: Name – Title` starts a new speaker
///    - `Bio: ...` overwrites the current bio
///    - `Expertise: a, b, c` sets the expertise tags
///    - `LinkedIn:` / `Twitter:` / `Image:` set the optional links
///    - any other non-empty line continues the current bio
///
/// Every emitted draft has a non-empty bio (a stock phrase when none was
/// found) and an expertise list (possibly empty).
pub fn extract_speakers(text: &str) -> Vec<SpeakerDraft> {
    if let Some(items) = parse_record_array(text, "speakers") {
        return items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| speaker_from_json(index, item))
            .collect();
    }

    let mut speakers = Vec::new();
    let mut current: Option<SpeakerDraft> = None;

    for raw in text.lines() {
        let line = strip_markup(raw);
        if line.is_empty() {
            continue;
        }

        if let Some((_, rest)) = match_numbered_label(&line, "speaker") {
            flush(&mut current, &mut speakers);
            let (name, title) = split_header(rest);
            let mut draft = SpeakerDraft::new(name);
            draft.title = title;
            current = Some(draft);
            continue;
        }

        let Some(draft) = current.as_mut() else {
            continue;
        };

        if let Some(bio) = match_label(&line, "bio") {
            draft.bio = bio.to_string();
        } else if let Some(list) = match_label(&line, "expertise") {
            draft.expertise = split_list(list);
        } else if let Some(link) = match_label(&line, "linkedin") {
            draft.linked_in = non_empty(link);
        } else if let Some(handle) = match_label(&line, "twitter") {
            draft.twitter = non_empty(handle);
        } else if let Some(url) = match_label(&line, "image") {
            draft.image_url = non_empty(url);
        } else if !looks_like_header(&line) {
            if draft.bio.is_empty() {
                draft.bio = line;
            } else {
                draft.bio.push(' ');
                draft.bio.push_str(&line);
            }
        }
    }

    flush(&mut current, &mut speakers);
    speakers
}

/// Split a comma list into trimmed, non-empty tokens.
pub(super) fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn flush(current: &mut Option<SpeakerDraft>, out: &mut Vec<SpeakerDraft>) {
    if let Some(mut draft) = current.take() {
        if draft.name.trim().is_empty() {
            return;
        }
        if draft.bio.trim().is_empty() {
            draft.bio = DEFAULT_BIO.to_string();
        }
        out.push(draft);
    }
}

/// A line that starts like a speaker header but failed the strict match
/// (e.g. `Speaker 3 Jane Doe` with no colon). It must not leak into a bio.
fn looks_like_header(line: &str) -> bool {
    let Some(head) = line.get(..7) else {
        return false;
    };
    head.eq_ignore_ascii_case("speaker")
        && line[7..]
            .trim_start()
            .starts_with(|c: char| c.is_ascii_digit())
}

fn speaker_from_json(index: usize, item: &Value) -> Option<SpeakerDraft> {
    if let Some(name) = item.as_str() {
        let mut draft = SpeakerDraft::new(name.trim());
        draft.bio = DEFAULT_BIO.to_string();
        return Some(draft);
    }
    if !item.is_object() {
        return None;
    }

    let name = string_field(item, &["name"]).unwrap_or_else(|| format!("Speaker {}", index + 1));
    let bio = string_field(item, &["bio", "justification"]).unwrap_or_else(|| DEFAULT_BIO.to_string());

    Some(SpeakerDraft {
        name,
        title: string_field(item, &["title"]),
        expertise: list_field(item, &["expertise"]).unwrap_or_default(),
        bio,
        linked_in: string_field(item, &["linkedIn", "linked_in", "linkedin"]),
        twitter: string_field(item, &["twitter"]),
        image_url: string_field(item, &["imageUrl", "image_url"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: &str = "Here are my suggestions:

Speaker 1: Ada Lovelace \u{2013} Chief Scientist, Analytical Engines
Bio: Pioneer of programmable computation.
Expertise: Algorithms, Mathematics , , Computing

Speaker 2: Grace Hopper \u{2013} Rear Admiral
Bio: Created the first compiler.
Expertise: Compilers, COBOL
";

    #[test]
    fn test_extracts_well_formed_blocks() {
        let speakers = extract_speakers(BLOCKS);
        assert_eq!(speakers.len(), 2);

        assert_eq!(speakers[0].name, "Ada Lovelace");
        assert_eq!(
            speakers[0].title.as_deref(),
            Some("Chief Scientist, Analytical Engines")
        );
        assert_eq!(speakers[0].bio, "Pioneer of programmable computation.");
        assert_eq!(
            speakers[0].expertise,
            vec!["Algorithms", "Mathematics", "Computing"]
        );

        assert_eq!(speakers[1].name, "Grace Hopper");
        assert_eq!(speakers[1].title.as_deref(), Some("Rear Admiral"));
        assert_eq!(speakers[1].expertise, vec!["Compilers", "COBOL"]);
    }

    #[test]
    fn test_header_label_is_case_insensitive() {
        let speakers = extract_speakers("SPEAKER 1: Alan Turing \u{2013} Mathematician");
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].name, "Alan Turing");
    }

    #[test]
    fn test_continuation_lines_append_to_bio() {
        let text = "Speaker 1: Ada \u{2013} Scientist
Wrote the first algorithm.
Worked with Babbage.
Speaker 2: Grace \u{2013} Admiral
Bio: Compiler pioneer.
Also coined \"debugging\".";
        let speakers = extract_speakers(text);
        assert_eq!(speakers[0].bio, "Wrote the first algorithm. Worked with Babbage.");
        assert_eq!(speakers[1].bio, "Compiler pioneer. Also coined \"debugging\".");
    }

    #[test]
    fn test_bio_line_overwrites_continuation() {
        let text = "Speaker 1: Ada \u{2013} Scientist
Some preamble.
Bio: The real bio.";
        assert_eq!(extract_speakers(text)[0].bio, "The real bio.");
    }

    #[test]
    fn test_malformed_header_does_not_leak_into_bio() {
        let text = "Speaker 1: Ada \u{2013} Scientist
Bio: Pioneer.
Speaker 2 Grace Hopper";
        let speakers = extract_speakers(text);
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].bio, "Pioneer.");
    }

    #[test]
    fn test_defaults_applied_on_flush() {
        let speakers = extract_speakers("Speaker 1: Linus Torvalds");
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].title, None);
        assert_eq!(speakers[0].bio, DEFAULT_BIO);
        assert!(speakers[0].expertise.is_empty());
    }

    #[test]
    fn test_nameless_header_is_dropped() {
        let speakers = extract_speakers("Speaker 1: \u{2013} Keynote\nBio: Nobody.");
        assert!(speakers.is_empty());
    }

    #[test]
    fn test_markdown_decorated_blocks() {
        let text = "- **Speaker 1: Ada Lovelace \u{2013} Scientist**
  **Bio:** Pioneer.
  **Expertise:** Math, Engines";
        let speakers = extract_speakers(text);
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].title.as_deref(), Some("Scientist"));
        assert_eq!(speakers[0].bio, "Pioneer.");
        assert_eq!(speakers[0].expertise, vec!["Math", "Engines"]);
    }

    #[test]
    fn test_json_array_short_circuits() {
        // The bio mentions a header; a fall-through to line parsing would split it.
        let text = r#"[
            {"name": "Ada", "title": "Scientist", "bio": "Speaker 2: not a header", "expertise": ["Math", "Engines"]},
            {"title": "Anonymous", "justification": "Knows things"},
            {"name": "Grace"}
        ]"#;
        let speakers = extract_speakers(text);
        assert_eq!(speakers.len(), 3);
        assert_eq!(speakers[0].name, "Ada");
        assert_eq!(speakers[0].bio, "Speaker 2: not a header");
        assert_eq!(speakers[0].expertise, vec!["Math", "Engines"]);
        assert_eq!(speakers[1].name, "Speaker 2");
        assert_eq!(speakers[1].bio, "Knows things");
        assert_eq!(speakers[2].bio, DEFAULT_BIO);
        assert!(speakers[2].expertise.is_empty());
    }

    #[test]
    fn test_json_wrapped_object_and_links() {
        let text = r#"{"speakers": [{"name": "Ada", "linkedIn": "https://linkedin.com/in/ada", "imageUrl": "https://img/ada.png"}]}"#;
        let speakers = extract_speakers(text);
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].linked_in.as_deref(), Some("https://linkedin.com/in/ada"));
        assert_eq!(speakers[0].image_url.as_deref(), Some("https://img/ada.png"));
    }

    #[test]
    fn test_unrecognizable_input_yields_empty() {
        assert!(extract_speakers("").is_empty());
        assert!(extract_speakers("I could not find any speakers, sorry.\n{not json").is_empty());
        assert!(extract_speakers(r#"{"name": "Ada"}"#).is_empty());
    }

    #[test]
    fn test_link_lines() {
        let text = "Speaker 1: Ada \u{2013} Scientist
LinkedIn: https://linkedin.com/in/ada
Twitter: @ada";
        let speakers = extract_speakers(text);
        assert_eq!(speakers[0].linked_in.as_deref(), Some("https://linkedin.com/in/ada"));
        assert_eq!(speakers[0].twitter.as_deref(), Some("@ada"));
        assert_eq!(speakers[0].bio, DEFAULT_BIO);
    }
}
