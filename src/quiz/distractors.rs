//! Distractor generation and question quality scoring

use crate::lexical::{filter_similar_terms, relative_edit_distance};
use crate::types::{ContextWindow, QuizAnchor};
use regex::Regex;
use std::sync::LazyLock;

/// Padding used when too few lexical distractors are found
pub const FALLBACK_DISTRACTORS: [&str; 4] = [
    "not specified",
    "undetermined",
    "not mentioned",
    "information absent",
];

/// Distractors produced for an empty correct answer
pub const PLACEHOLDER_DISTRACTORS: [&str; 3] = ["Option A", "Option B", "Option C"];

/// Number of distractors every question needs
pub const MIN_DISTRACTORS: usize = 3;

/// Shortest pool term (in characters) used as a distractor
const MIN_TERM_CHARS: usize = 3;

static RE_CONTEXT_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-zàâäéèêëïîôùûüÿçœ'-]{3,}\b").unwrap()
});

/// Words of three or more letters from both sides of a context window
pub fn context_terms(context: &ContextWindow) -> Vec<String> {
    [context.before.as_str(), context.after.as_str()]
        .into_iter()
        .flat_map(|side| RE_CONTEXT_TERM.find_iter(side))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Give `candidate` the casing style of `reference`: all caps, capitalized
/// or lowercase.
pub fn match_case(candidate: &str, reference: &str) -> String {
    let mut cased = reference.chars().filter(|c| c.is_alphabetic());
    let Some(first) = reference.chars().next() else {
        return candidate.to_string();
    };

    let has_cased = cased.clone().any(|c| c.is_lowercase() || c.is_uppercase());
    if has_cased && !cased.any(|c| c.is_lowercase()) {
        return candidate.to_uppercase();
    }
    if first.is_uppercase() {
        return capitalize(candidate);
    }
    candidate.to_lowercase()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Plausible wrong answers for `correct`.
///
/// Pool terms and context words are ranked by similarity to the answer,
/// copies of the answer are dropped and the rest take the answer's casing.
/// Fewer than [`MIN_DISTRACTORS`] results are padded with
/// [`FALLBACK_DISTRACTORS`]. At most `max` are returned.
pub fn generate_distractors(
    correct: &str,
    pool: &[String],
    anchor: &QuizAnchor,
    max: usize,
) -> Vec<String> {
    if correct.is_empty() {
        return PLACEHOLDER_DISTRACTORS.iter().map(|s| s.to_string()).collect();
    }

    let mut candidates: Vec<String> = pool
        .iter()
        .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
        .cloned()
        .collect();
    candidates.extend(context_terms(anchor.context()));

    let correct_lower = correct.to_lowercase();
    let mut distractors: Vec<String> = Vec::new();
    for candidate in filter_similar_terms(correct, &candidates, max) {
        if candidate.to_lowercase() == correct_lower {
            continue;
        }
        let cased = match_case(&candidate, correct);
        if !distractors.contains(&cased) {
            distractors.push(cased);
        }
        if distractors.len() >= max {
            break;
        }
    }

    if distractors.len() < MIN_DISTRACTORS {
        for fallback in FALLBACK_DISTRACTORS {
            if fallback != correct_lower {
                distractors.push(fallback.to_string());
            }
            if distractors.len() >= MIN_DISTRACTORS {
                break;
            }
        }
    }

    distractors.truncate(max);
    distractors
}

/// Rate a question in `[0, 1]` from its length and how far the wrong
/// options are from the answer.
///
/// Zero when the question or options are empty or when `correct` is not
/// among the options.
pub fn score_question_quality(question: &str, options: &[String], correct: &str) -> f64 {
    if question.is_empty() || options.is_empty() || !options.iter().any(|o| o == correct) {
        return 0.0;
    }

    let mut distinct: Vec<&String> = options.iter().collect();
    distinct.sort_unstable();
    distinct.dedup();
    let unique_bonus = if distinct.len() == options.len() { 0.15 } else { 0.05 };

    let length_score = (question.split_whitespace().count() as f64 / 14.0).min(1.0);
    let score = 0.4 * length_score + 0.45 * lexical_diversity(correct, options) + unique_bonus;
    (score.min(1.0) * 100.0).round() / 100.0
}

/// Mean relative edit distance from the answer to the other options,
/// clamped to `[0.2, 1]`; 0.4 when there are no other options.
fn lexical_diversity(correct: &str, options: &[String]) -> f64 {
    let correct_lower = correct.to_lowercase();
    let distances: Vec<f64> = options
        .iter()
        .filter(|option| option.to_lowercase() != correct_lower)
        .map(|option| relative_edit_distance(correct, option))
        .collect();

    if distances.is_empty() {
        return 0.4;
    }
    let mean = distances.iter().sum::<f64>() / distances.len() as f64;
    mean.clamp(0.2, 1.0)
}
