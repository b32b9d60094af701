//! Sparse unit vectors over lexical terms
//!
//! Each sentence becomes an L2-normalized bag of term weights; cosine
//! similarity between two sentences is then a plain dot product.

use rustc_hash::FxHashMap;

/// A sparse unit vector representation of a sentence
#[derive(Debug, Clone, Default)]
pub struct UnitVector {
    /// Non-zero dimensions: term -> weight
    pub dimensions: FxHashMap<String, f64>,
    /// L2 norm of the vector before normalization
    pub norm: f64,
}

impl UnitVector {
    /// Create a new empty unit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a map of dimensions
    pub fn from_dimensions(mut dimensions: FxHashMap<String, f64>) -> Self {
        let norm = Self::compute_norm(&dimensions);
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// Compute L2 norm
    fn compute_norm(dimensions: &FxHashMap<String, f64>) -> f64 {
        dimensions.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        // Iterate the smaller side; both are normalized so the dot product is the cosine
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .dimensions
            .iter()
            .filter_map(|(key, value)| large.dimensions.get(key).map(|o| value * o))
            .sum()
    }

    /// Weight of a single term (0.0 when absent)
    pub fn weight(&self, term: &str) -> f64 {
        self.dimensions.get(term).copied().unwrap_or(0.0)
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}
