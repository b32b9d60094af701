//! Extractive summarization
//!
//! Ranks sentences by lexical centrality, keeps a length-dependent share of
//! them and reassembles the survivors in source order.

pub mod selector;

pub use selector::{selection_size, ScoringMode, SelectedSentence, SentenceSelector, SummaryResult};

use crate::cleanup::{clean_inline, prepare_document, truncate_chars};
use crate::nlp::{split_sentences, StopwordFilter};
use crate::types::{StudyConfig, SummaryLength};

/// Summarize `raw_text`, keeping the configured share of sentences for `length`.
///
/// Empty input gives an empty string. Text without any usable sentence gives
/// a cleaned prefix of the document. Otherwise the summary ends with `.`,
/// `!` or `?`.
pub fn generate_summary(raw_text: &str, length: SummaryLength, config: &StudyConfig) -> String {
    let prepared = prepare_document(raw_text, &config.boilerplate);
    if prepared.is_empty() {
        return String::new();
    }

    let sentences = {
        trace_stage!("split");
        split_sentences(&prepared, config.analyzer.summary_min_words)
    };
    if sentences.is_empty() {
        trace_event!("no sentences survived splitting; returning document prefix");
        return clean_inline(truncate_chars(&prepared, config.summary.fallback_prefix_chars));
    }

    let stopwords = StopwordFilter::from_language(config.analyzer.stopword_language.as_deref());
    let result = SentenceSelector::new(config.summary.ratio(length))
        .with_position_floor(config.analyzer.position_floor)
        .select(&sentences, &stopwords);

    finish_summary(&result.text())
}

/// Flatten whitespace and make sure the text ends with terminal punctuation
fn finish_summary(text: &str) -> String {
    let mut summary = clean_inline(text);
    if !summary.is_empty() && !summary.ends_with(['.', '!', '?']) {
        summary.push('.');
    }
    summary
}
