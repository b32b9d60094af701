//! String normalization
//!
//! Unicode NFKC normalization, control/format character removal and
//! whitespace collapsing. Line breaks survive [`clean_text`] so the
//! boilerplate detector can still reason about lines; [`clean_inline`]
//! flattens everything onto one line for user-facing strings.

use unicode_normalization::UnicodeNormalization;

/// Normalize raw text while keeping its line structure.
///
/// - `\r\n` and lone `\r` become `\n`
/// - control, zero-width/format and private-use characters are removed
/// - Unicode NFKC normalization (non-breaking spaces become plain spaces)
/// - whitespace runs inside a line collapse to one space, lines are trimmed
/// - runs of blank lines collapse to a single blank line
///
/// The function is idempotent.
pub fn clean_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let unified = input.replace("\r\n", "\n").replace('\r', "\n");
    let scrubbed: String = unified
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !is_removable(c))
        .collect();
    let normalized: String = scrubbed.nfkc().collect();

    let mut out = String::with_capacity(normalized.len());
    let mut pending_blank = false;
    for line in normalized.split('\n') {
        let collapsed = collapse_spaces(line);
        if collapsed.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(&collapsed);
    }
    out
}

/// Normalize and flatten text onto a single line.
pub fn clean_inline(input: &str) -> String {
    collapse_spaces(&clean_text(input))
}

/// Collapse every whitespace run (newlines included) into one space and trim.
pub fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn is_removable(c: char) -> bool {
    c.is_control() || is_format_char(c) || is_pua_char(c)
}

/// Zero-width and bidi format characters
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'              // Soft hyphen
        | '\u{061C}'            // Arabic letter mark
        | '\u{180E}'            // Mongolian vowel separator
        | '\u{200B}'..='\u{200F}'
        | '\u{202A}'..='\u{202E}'
        | '\u{2060}'..='\u{2064}'
        | '\u{2066}'..='\u{206F}'
        | '\u{FEFF}'            // BOM
        | '\u{FFF9}'..='\u{FFFB}'
    )
}

/// Private Use Area characters
fn is_pua_char(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_removes_control_and_zero_width() {
        let raw = "Bon\u{200B}jour\u{0007} le\u{FEFF} monde";
        assert_eq!(clean_text(raw), "Bonjour le monde");
    }

    #[test]
    fn test_nbsp_and_tabs_become_spaces() {
        assert_eq!(clean_text("a\u{00A0}\u{00A0}b\t\tc"), "a b c");
    }

    #[test]
    fn test_nfkc_compatibility_forms() {
        // Ligature "ﬁ" and fullwidth digits
        assert_eq!(clean_text("ﬁn １２"), "fin 12");
    }

    #[test]
    fn test_keeps_lines_and_collapses_blank_runs() {
        let raw = "  Titre  \r\n\r\n\r\n\nPremier   paragraphe.\nSuite.\n\n";
        assert_eq!(clean_text(raw), "Titre\n\nPremier paragraphe.\nSuite.");
    }

    #[test]
    fn test_leading_blank_lines_dropped() {
        assert_eq!(clean_text("\n\n\nTexte"), "Texte");
    }

    #[test]
    fn test_clean_inline_flattens() {
        assert_eq!(clean_inline("Une\nligne\n\ndeux"), "Une ligne deux");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n\t "), "");
    }

    #[test]
    fn test_truncate_chars_is_char_aware() {
        assert_eq!(truncate_chars("éléphant", 3), "élé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    proptest! {
        #[test]
        fn prop_clean_text_idempotent(
            raw in "[a-zA-Zéèàç0-9 \t\n\r.,;!?'\u{00A0}\u{200B}\u{FEFF}\u{0301}ﬁ]{0,200}"
        ) {
            let once = clean_text(&raw);
            prop_assert_eq!(clean_text(&once), once);
        }

        #[test]
        fn prop_clean_inline_idempotent(raw in "[\\p{L}\\p{N}\\p{P} \t\n]{0,120}") {
            let once = clean_inline(&raw);
            prop_assert_eq!(clean_inline(&once), once.clone());
            prop_assert!(!once.contains('\n'));
        }
    }
}
