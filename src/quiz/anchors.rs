//! Quiz anchor mining
//!
//! Pairs every sentence with the weighted keywords it contains. Each pair
//! becomes a [`QuizAnchor`]; the resulting list is ranked so the strongest,
//! earliest material is questioned first.

use crate::lexical::{build_term_weight_matrix, extract_keywords};
use crate::nlp::{find_named_entities, restore_original_token, slice_context, split_sentences, StopwordFilter};
use crate::types::{AnalyzerConfig, QuizAnchor};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;

/// Ranked anchors plus the term pool distractors are drawn from
#[derive(Debug, Clone, Default)]
pub struct KeyInformation {
    pub anchors: Vec<QuizAnchor>,
    /// Keywords (best first) followed by named entities, without duplicates
    pub pool: Vec<String>,
}

impl KeyInformation {
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Mine quiz anchors from cleaned text.
///
/// Returns an empty result when no sentence has enough words or no keyword
/// survives term weighting.
pub fn extract_key_information(
    text: &str,
    config: &AnalyzerConfig,
    stopwords: &StopwordFilter,
) -> KeyInformation {
    trace_stage!("anchors");

    let sentences = split_sentences(text, config.quiz_min_words);
    if sentences.is_empty() {
        return KeyInformation::default();
    }

    let keywords = match build_term_weight_matrix(&sentences, stopwords) {
        Ok(matrix) => extract_keywords(&matrix, config.max_keywords),
        Err(_err) => {
            trace_event!(error = %_err, "no keywords for quiz anchors");
            return KeyInformation::default();
        }
    };
    if keywords.is_empty() {
        return KeyInformation::default();
    }

    let entities = find_named_entities(text);
    let entity_set: FxHashSet<&str> = entities.iter().map(String::as_str).collect();

    let mut seen_pool: FxHashSet<&str> = FxHashSet::default();
    let pool: Vec<String> = keywords
        .iter()
        .map(|k| k.term.as_str())
        .chain(entities.iter().map(String::as_str))
        .filter(|term| seen_pool.insert(*term))
        .map(str::to_string)
        .collect();

    let last = sentences.len().saturating_sub(1).max(1) as f64;
    let mut anchors: Vec<QuizAnchor> = Vec::new();
    let mut slots: FxHashMap<(String, String), usize> = FxHashMap::default();

    for sentence in &sentences {
        let lowered = sentence.text.to_lowercase();
        for keyword in keywords.iter().filter(|k| lowered.contains(k.term.as_str())) {
            let surface = restore_original_token(&sentence.text, &keyword.term);
            let is_entity = entity_set.contains(surface.as_str())
                || entity_set.contains(surface.to_uppercase().as_str());
            let context = slice_context(&sentence.text, &keyword.term, config.context_window);

            let anchor = match QuizAnchor::new(
                sentence.clone(),
                surface,
                context,
                sentence.index as f64 / last,
                keyword.score,
                is_entity,
            ) {
                Ok(anchor) => anchor,
                Err(_err) => {
                    trace_event!(error = %_err, "anchor rejected");
                    continue;
                }
            };

            let key = (sentence.text.clone(), anchor.keyword_lower().to_string());
            match slots.get(&key).copied() {
                Some(slot) if anchor.score() > anchors[slot].score() => anchors[slot] = anchor,
                Some(_) => {}
                None => {
                    slots.insert(key, anchors.len());
                    anchors.push(anchor);
                }
            }
        }
    }

    anchors.sort_by(compare_anchors);
    KeyInformation { anchors, pool }
}

/// Best first: higher score, earlier position, longer sentence, then entities.
/// The sort is stable, so anything still tied stays in discovery order.
fn compare_anchors(a: &QuizAnchor, b: &QuizAnchor) -> Ordering {
    b.score()
        .partial_cmp(&a.score())
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            (1.0 - b.position())
                .partial_cmp(&(1.0 - a.position()))
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| b.sentence().word_count.cmp(&a.sentence().word_count))
        // Extra tie-break beyond score, position and length: entities first,
        // so equal-weight keywords in one sentence favour a proper noun
        .then_with(|| b.is_entity().cmp(&a.is_entity()))
}
