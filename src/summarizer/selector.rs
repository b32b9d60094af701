//! Ratio-based sentence selection for summarization
//!
//! Picks the highest-scoring sentences and hands them back in document
//! order so the summary reads like the source.

use crate::lexical::{build_term_weight_matrix, rank_sentences, word_count_ranking, SentenceRanking};
use crate::nlp::StopwordFilter;
use crate::types::Sentence;

/// How sentence scores were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Cosine-similarity centrality with positional decay
    Centrality,
    /// Raw word counts, used when term weights are degenerate
    WordCount,
}

/// A selected sentence with its score
#[derive(Debug, Clone)]
pub struct SelectedSentence {
    pub sentence: Sentence,
    pub score: f64,
}

/// Result of sentence selection
#[derive(Debug, Clone)]
pub struct SummaryResult {
    /// Selected sentences in document order
    pub sentences: Vec<SelectedSentence>,
    /// Number of candidate sentences
    pub total_sentences: usize,
    pub mode: ScoringMode,
}

impl SummaryResult {
    /// Selected sentences joined with single spaces
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Number of sentences kept for `n` candidates: `round(n * ratio)`, at least
/// one, never more than `n`.
pub fn selection_size(n: usize, ratio: f64) -> usize {
    if n == 0 {
        return 0;
    }
    ((n as f64 * ratio).round() as usize).clamp(1, n)
}

/// Ratio-based sentence selector
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    ratio: f64,
    position_floor: f64,
}

impl SentenceSelector {
    /// Create a selector keeping `ratio` of the sentences
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio,
            position_floor: 0.7,
        }
    }

    /// Set the positional weight of the last sentence
    pub fn with_position_floor(mut self, floor: f64) -> Self {
        self.position_floor = floor;
        self
    }

    /// Score sentences, falling back to word counts when term weights cannot
    /// be built.
    pub fn score(&self, sentences: &[Sentence], stopwords: &StopwordFilter) -> (SentenceRanking, ScoringMode) {
        let ranked = build_term_weight_matrix(sentences, stopwords)
            .and_then(|matrix| rank_sentences(&matrix, self.position_floor));
        match ranked {
            Ok(ranking) => (ranking, ScoringMode::Centrality),
            Err(_err) => {
                trace_event!(error = %_err, "falling back to word-count scoring");
                (word_count_ranking(sentences), ScoringMode::WordCount)
            }
        }
    }

    /// Select the best sentences and return them in document order
    pub fn select(&self, sentences: &[Sentence], stopwords: &StopwordFilter) -> SummaryResult {
        trace_stage!("select");

        let (ranking, mode) = self.score(sentences, stopwords);
        let mut chosen = ranking.top_n(selection_size(sentences.len(), self.ratio));
        chosen.sort_unstable();

        SummaryResult {
            sentences: chosen
                .into_iter()
                .map(|idx| SelectedSentence {
                    sentence: sentences[idx].clone(),
                    score: ranking.score(idx),
                })
                .collect(),
            total_sentences: sentences.len(),
            mode,
        }
    }
}
