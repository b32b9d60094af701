//! Keyword extraction from term weights

use super::weights::TermWeightMatrix;
use crate::types::Keyword;
use std::cmp::Ordering;

/// Shortest term (in characters) kept as a keyword
pub const MIN_KEYWORD_CHARS: usize = 3;

/// The `max_keywords` heaviest terms, summing each term's weight over all
/// sentences. Ties are broken by term, ascending.
pub fn extract_keywords(matrix: &TermWeightMatrix, max_keywords: usize) -> Vec<Keyword> {
    let mut keywords: Vec<Keyword> = matrix
        .column_sums()
        .into_iter()
        .filter(|(term, score)| *score > 0.0 && term.chars().count() >= MIN_KEYWORD_CHARS)
        .map(|(term, score)| Keyword::new(term, score))
        .collect();

    keywords.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    keywords.truncate(max_keywords);
    keywords
}
