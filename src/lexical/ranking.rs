//! Centrality ranking of sentences
//!
//! A sentence's centrality is the sum of its cosine similarities to every
//! other sentence (the weighted degree in the similarity graph), damped by a
//! positional weight that decays linearly from the first sentence to the last.

use super::weights::TermWeightMatrix;
use crate::errors::{Result, StudyError};
use crate::graph::{CsrGraph, GraphBuilder};
use crate::types::Sentence;
use std::cmp::Ordering;

/// Scores indexed by sentence position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceRanking {
    pub scores: Vec<f64>,
}

impl SentenceRanking {
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Indices of the `n` best sentences, best first.
    ///
    /// Equal scores keep document order.
    pub fn top_n(&self, n: usize) -> Vec<usize> {
        let mut indexed: Vec<(usize, f64)> = self.scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        indexed.into_iter().take(n).map(|(i, _)| i).collect()
    }

    /// Get the score for a specific sentence
    pub fn score(&self, idx: usize) -> f64 {
        self.scores.get(idx).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Linear weights from 1.0 (first sentence) down to `floor` (last sentence)
pub fn positional_weights(n: usize, floor: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let step = (floor - 1.0) / (n - 1) as f64;
            (0..n).map(|i| 1.0 + step * i as f64).collect()
        }
    }
}

/// Rank the sentences behind `matrix` by similarity centrality.
///
/// A single sentence scores `1.0`.
pub fn rank_sentences(matrix: &TermWeightMatrix, position_floor: f64) -> Result<SentenceRanking> {
    trace_stage!("rank");

    match matrix.num_sentences() {
        0 => Err(StudyError::EmptyInput),
        1 => Ok(SentenceRanking::new(vec![1.0])),
        _ => {
            let graph = CsrGraph::from_builder(&GraphBuilder::from_vectors(matrix.rows()));
            let scores = positional_weights(graph.num_nodes(), position_floor)
                .into_iter()
                .enumerate()
                .map(|(node, weight)| graph.node_total_weight(node as u32) * weight)
                .collect();
            Ok(SentenceRanking::new(scores))
        }
    }
}

/// Fallback ranking used when term weights are degenerate: longer sentences first
pub fn word_count_ranking(sentences: &[Sentence]) -> SentenceRanking {
    SentenceRanking::new(sentences.iter().map(|s| s.word_count as f64).collect())
}
