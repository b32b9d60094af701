//! Graph builder with efficient edge handling
//!
//! Nodes are sentences; undirected edges carry the cosine similarity between
//! their term-weight vectors. Self-loops are never stored, which gives the
//! zeroed similarity diagonal for free.

use crate::lexical::unit_vector::UnitVector;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Append a node, returning its ID
    pub fn add_node(&mut self) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(BuilderNode::default());
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build the sentence similarity graph
    ///
    /// Node `i` is sentence `i`; every pair with positive cosine similarity
    /// gets an edge weighted by that similarity.
    pub fn from_vectors(vectors: &[UnitVector]) -> Self {
        let mut builder = Self::with_capacity(vectors.len());
        for _ in vectors {
            builder.add_node();
        }

        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                let similarity = vectors[i].cosine_similarity(&vectors[j]);
                if similarity > 0.0 {
                    builder.increment_edge(i as u32, j as u32, similarity);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn nodes(&self) -> &[BuilderNode] {
        &self.nodes
    }
}
