//! TF-ISF term weighting
//!
//! Sentences play the role of documents: a term's weight in a sentence is
//! its raw count times a smoothed inverse sentence frequency
//! `ln((1 + n) / (1 + df)) + 1`, and each sentence row is L2-normalized.
//! Terms are unigrams plus bigrams of adjacent tokens once stop words have
//! been removed.

use super::unit_vector::UnitVector;
use crate::errors::{Result, StudyError};
use crate::nlp::{word_tokens, StopwordFilter};
use crate::types::Sentence;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Per-sentence term weights plus the vocabulary they were built from
#[derive(Debug, Clone)]
pub struct TermWeightMatrix {
    rows: Vec<UnitVector>,
    /// Term -> number of sentences containing it, in lexical order
    vocabulary: BTreeMap<String, usize>,
}

impl TermWeightMatrix {
    /// One normalized vector per sentence, in sentence order
    pub fn rows(&self) -> &[UnitVector] {
        &self.rows
    }

    pub fn num_sentences(&self) -> usize {
        self.rows.len()
    }

    /// Total weight of every term across all sentences, in lexical term order
    pub fn column_sums(&self) -> Vec<(String, f64)> {
        self.vocabulary
            .keys()
            .map(|term| {
                let total = self.rows.iter().map(|row| row.weight(term)).sum();
                (term.clone(), total)
            })
            .collect()
    }
}

/// Unigrams and bigrams of a sentence after stop-word removal
pub fn sentence_terms(text: &str, stopwords: &StopwordFilter) -> Vec<String> {
    let content: Vec<String> = word_tokens(text)
        .into_iter()
        .filter(|token| !stopwords.is_stopword(token))
        .collect();

    let bigrams = content.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]));
    let mut terms: Vec<String> = Vec::with_capacity(content.len() * 2);
    terms.extend(content.iter().cloned());
    terms.extend(bigrams);
    terms
}

/// Build the TF-ISF matrix for the given sentences.
///
/// Fails with [`StudyError::EmptyInput`] when there are no sentences and
/// [`StudyError::DegenerateVectors`] when no term survives stop-word removal.
pub fn build_term_weight_matrix(
    sentences: &[Sentence],
    stopwords: &StopwordFilter,
) -> Result<TermWeightMatrix> {
    trace_stage!("weights");

    if sentences.is_empty() {
        return Err(StudyError::EmptyInput);
    }

    let counts: Vec<FxHashMap<String, f64>> = sentences
        .iter()
        .map(|sentence| {
            let mut tf: FxHashMap<String, f64> = FxHashMap::default();
            for term in sentence_terms(&sentence.text, stopwords) {
                *tf.entry(term).or_insert(0.0) += 1.0;
            }
            tf
        })
        .collect();

    let mut vocabulary: BTreeMap<String, usize> = BTreeMap::new();
    for tf in &counts {
        for term in tf.keys() {
            *vocabulary.entry(term.clone()).or_insert(0) += 1;
        }
    }

    if vocabulary.is_empty() {
        trace_event!(sentences = sentences.len(), "no terms survived stop-word removal");
        return Err(StudyError::DegenerateVectors);
    }

    let n = sentences.len() as f64;
    let rows = counts
        .into_iter()
        .map(|mut tf| {
            for (term, weight) in tf.iter_mut() {
                let df = vocabulary.get(term).copied().unwrap_or(0) as f64;
                *weight *= ((1.0 + n) / (1.0 + df)).ln() + 1.0;
            }
            UnitVector::from_dimensions(tf)
        })
        .collect();

    Ok(TermWeightMatrix { rows, vocabulary })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(texts: &[&str]) -> Vec<Sentence> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Sentence::new(*t, i))
            .collect()
    }

    #[test]
    fn test_sentence_terms_bigrams_skip_stopwords() {
        let stopwords = StopwordFilter::french_curated();
        let terms = sentence_terms("Paris est la capitale de la France.", &stopwords);
        assert_eq!(
            terms,
            vec!["paris", "capitale", "france", "paris capitale", "capitale france"]
        );
    }

    #[test]
    fn test_rows_are_normalized() {
        let stopwords = StopwordFilter::french_curated();
        let matrix = build_term_weight_matrix(
            &sentences(&[
                "Paris est la capitale de la France.",
                "Lyon est une grande ville de France.",
            ]),
            &stopwords,
        )
        .unwrap();

        assert_eq!(matrix.num_sentences(), 2);
        for row in matrix.rows() {
            let norm: f64 = row.dimensions.values().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shared_terms_weigh_less() {
        let stopwords = StopwordFilter::french_curated();
        let matrix = build_term_weight_matrix(
            &sentences(&["Paris capitale France.", "Lyon ville France."]),
            &stopwords,
        )
        .unwrap();
        let row = &matrix.rows()[0];
        assert!(row.weight("france") < row.weight("paris"));
    }

    #[test]
    fn test_empty_input() {
        let stopwords = StopwordFilter::french_curated();
        assert!(matches!(
            build_term_weight_matrix(&[], &stopwords),
            Err(StudyError::EmptyInput)
        ));
    }

    #[test]
    fn test_degenerate_vocabulary() {
        let stopwords = StopwordFilter::french_curated();
        let result = build_term_weight_matrix(&sentences(&["de la et le ou."]), &stopwords);
        assert!(matches!(result, Err(StudyError::DegenerateVectors)));
    }

    #[test]
    fn test_column_sums_in_term_order() {
        let stopwords = StopwordFilter::french_curated();
        let matrix =
            build_term_weight_matrix(&sentences(&["zèbre abeille."]), &stopwords).unwrap();
        let terms: Vec<_> = matrix.column_sums().into_iter().map(|(t, _)| t).collect();
        assert_eq!(terms, vec!["abeille", "zèbre", "zèbre abeille"]);
    }
}
