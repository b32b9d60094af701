//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR stores edges contiguously; a node's centrality is the sum of the
//! weights in its row.

use super::builder::GraphBuilder;

/// A graph in Compressed Sparse Row format
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    col_idx: Vec<u32>,
    /// Edge weights
    weights: Vec<f64>,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let mut row_ptr = Vec::with_capacity(builder.node_count() + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();

        row_ptr.push(0);

        for node in builder.nodes() {
            // Collect and sort edges for deterministic iteration
            let mut edges: Vec<_> = node.edges.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|(k, _)| *k);

            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            row_ptr,
            col_idx,
            weights,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.row_ptr.len() - 1
    }

    /// Iterate over neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Sum of the similarity weights to every neighbor
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.neighbors(node).map(|(_, weight)| weight).sum()
    }
}
