//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries. Used for log previews of raw model output.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Strip list bullets, ordinals, heading hashes and bold markers that models
/// like to add around otherwise plain lines (`- `, `1. `, `## `, `**`).
pub fn strip_markup(line: &str) -> String {
    let mut s = line.trim();
    loop {
        let before = s;
        s = strip_ordinal(s)
            .trim_start_matches('#')
            .trim_start_matches("**")
            .trim_start_matches(['-', '*', '\u{2022}'])
            .trim_start();
        if s == before {
            break;
        }
    }
    s.replace("**", "").trim().to_string()
}

/// `12. rest` / `3) rest` -> `rest`; anything else unchanged.
fn strip_ordinal(s: &str) -> &str {
    let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits == 0 {
        return s;
    }
    let rest = &s[digits..];
    match rest.strip_prefix(['.', ')']) {
        Some(after) if after.starts_with(char::is_whitespace) => after,
        _ => s,
    }
}

/// Collapse `s` to `None` when it is empty after trimming.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        // 'é' is 2 bytes; cutting inside it must back up
        assert_eq!(truncate("ééééé", 6), "é...");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("- **Speaker 1: Ada**"), "Speaker 1: Ada");
        assert_eq!(strip_markup("## Panel 2: Topic"), "Panel 2: Topic");
        assert_eq!(strip_markup("1. **Panel 1: Topic**"), "Panel 1: Topic");
        assert_eq!(strip_markup("2020 was a big year."), "2020 was a big year.");
        assert_eq!(strip_markup("  plain text "), "plain text");
        assert_eq!(strip_markup("**Bio:** Builds compilers"), "Bio: Builds compilers");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
    }
}
