//! Edit distance and string-similarity ranking for distractors

use std::cmp::Reverse;

/// Unit-cost Levenshtein distance over characters.
///
/// Only two rows of the dynamic-programming table are kept.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Edit distance of the lowercased strings divided by the reference length
/// (at least 1), so 0.0 means identical and 1.0 means fully rewritten.
pub fn relative_edit_distance(reference: &str, other: &str) -> f64 {
    let reference = reference.to_lowercase();
    let length = reference.chars().count().max(1);
    edit_distance(&reference, &other.to_lowercase()) as f64 / length as f64
}

/// Rank candidates by how close they look to `base`.
///
/// Score is `max(len) - distance - |len difference|` (characters, compared
/// lowercase), highest first with ties kept in input order. Empty candidates
/// and case-insensitive copies of `base` are dropped.
pub fn filter_similar_terms<S: AsRef<str>>(base: &str, candidates: &[S], limit: usize) -> Vec<String> {
    let base_lower = base.to_lowercase();
    let base_len = base_lower.chars().count() as i64;

    let mut scored: Vec<(&str, i64)> = candidates
        .iter()
        .map(|term| term.as_ref())
        .filter(|term| !term.is_empty() && term.to_lowercase() != base_lower)
        .map(|term| {
            let len = term.chars().count() as i64;
            let distance = edit_distance(&base_lower, &term.to_lowercase()) as i64;
            (term, base_len.max(len) - distance - (base_len - len).abs())
        })
        .collect();

    scored.sort_by_key(|&(_, score)| Reverse(score));
    scored
        .into_iter()
        .take(limit)
        .map(|(term, _)| term.to_string())
        .collect()
}
