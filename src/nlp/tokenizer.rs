//! Sentence splitting and token-level helpers
//!
//! Everything here works on plain whitespace tokens and a few regexes; there
//! is no part-of-speech tagging or lemmatization.

use crate::cleanup::normalize::collapse_spaces;
use crate::types::{ContextWindow, Sentence};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Word tokens used for term weighting: two or more word characters
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

static RE_CAPITALIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-ZÀÂÄÉÈÊËÏÎÔÙÛÜŸÇŒ][a-zàâäéèêëïîôùûüÿçœ]{2,}\b").unwrap()
});

static RE_ACRONYM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").unwrap());

/// Punctuation stripped from token edges when matching multi-word terms
const EDGE_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Split text after `.`, `!` or `?` followed by whitespace.
///
/// Fragments with fewer than `min_words` tokens are dropped; the survivors
/// are numbered consecutively in document order.
pub fn split_sentences(text: &str, min_words: usize) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    for fragment in sentence_fragments(text) {
        let collapsed = collapse_spaces(fragment);
        if collapsed.is_empty() || collapsed.split_whitespace().count() < min_words {
            continue;
        }
        let index = sentences.len();
        sentences.push(Sentence::new(collapsed, index));
    }
    sentences
}

fn sentence_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(boundary, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        fragments.push(&text[start..boundary]);
        while chars.peek().is_some_and(|&(_, w)| w.is_whitespace()) {
            chars.next();
        }
        start = chars.peek().map_or(text.len(), |&(idx, _)| idx);
    }

    if start < text.len() {
        fragments.push(&text[start..]);
    }
    fragments
}

/// Lowercase word tokens (two or more word characters)
pub fn word_tokens(text: &str) -> Vec<String> {
    RE_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Capitalized words followed by acronyms, deduplicated in first-seen order.
///
/// A crude proper-noun heuristic: no dictionary or grammar check, so a
/// capitalized sentence opener counts too.
pub fn find_named_entities(text: &str) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    RE_CAPITALIZED
        .find_iter(text)
        .chain(RE_ACRONYM.find_iter(text))
        .map(|m| m.as_str())
        .filter(|surface| seen.insert(*surface))
        .map(str::to_string)
        .collect()
}

/// Up to `window` tokens before and after the first match of `term`.
///
/// A single token matches when it contains the term (case-insensitive). For
/// multi-word terms that no single token contains, the first run of tokens
/// equal to the term's words (edge punctuation stripped) is used.
pub fn slice_context(sentence: &str, term: &str, window: usize) -> ContextWindow {
    let term_lower = term.trim().to_lowercase();
    if term_lower.is_empty() {
        return ContextWindow::default();
    }

    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    let mut span = 1;
    let mut found = tokens
        .iter()
        .position(|token| token.to_lowercase().contains(&term_lower));

    if found.is_none() && term_lower.contains(' ') {
        let parts: Vec<&str> = term_lower.split_whitespace().collect();
        span = parts.len();
        if tokens.len() >= span {
            found = (0..=tokens.len() - span).find(|&start| {
                tokens[start..start + span]
                    .iter()
                    .zip(&parts)
                    .all(|(token, part)| token.trim_matches(EDGE_PUNCTUATION).to_lowercase() == *part)
            });
        }
    }

    let Some(idx) = found else {
        return ContextWindow::default();
    };

    let after_start = (idx + span).min(tokens.len());
    let after_end = (idx + span + window).min(tokens.len());
    ContextWindow::new(
        tokens[idx.saturating_sub(window)..idx].join(" "),
        tokens[after_start..after_end].join(" "),
    )
}

/// The keyword as written in the sentence (whole-word, case-insensitive),
/// or the keyword itself when it cannot be found.
pub fn restore_original_token(sentence: &str, keyword: &str) -> String {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
    match Regex::new(&pattern) {
        Ok(re) => re
            .find(sentence)
            .map_or_else(|| keyword.to_string(), |m| m.as_str().to_string()),
        Err(_) => keyword.to_string(),
    }
}
