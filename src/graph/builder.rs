//! Sentence graph builder
//!
//! Nodes are sentence positions `0..n`; edges carry similarity weights.
//! Adjacency lives in FxHashMaps while the graph is being built and is
//! frozen into a [`CsrGraph`](super::csr::CsrGraph) for ranking.

use crate::similarity::SimilarityMatrix;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable, undirected weighted graph over sentence positions
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with `n` isolated nodes
    pub fn with_nodes(n: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::default(); n],
        }
    }

    /// Append an isolated node, returning its ID
    pub fn add_node(&mut self) -> u32 {
        self.nodes.push(BuilderNode::default());
        (self.nodes.len() - 1) as u32
    }

    /// Set the weight of the undirected edge `from`-`to`.
    ///
    /// Self-loops, unknown nodes, and non-positive or non-finite weights are
    /// ignored.
    pub fn add_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to || !weight.is_finite() || weight <= 0.0 {
            return;
        }
        let n = self.nodes.len() as u32;
        if from >= n || to >= n {
            return;
        }

        self.nodes[from as usize].edges.insert(to, weight);
        self.nodes[to as usize].edges.insert(from, weight);
    }

    /// Build the sentence graph from a similarity matrix: one node per row,
    /// an edge for every pair `i != j` with positive similarity.
    pub fn from_similarity(matrix: &SimilarityMatrix) -> Self {
        let n = matrix.size();
        let mut builder = Self::with_nodes(n);
        for i in 0..n {
            for j in (i + 1)..n {
                builder.add_edge(i as u32, j as u32, matrix.get(i, j));
            }
        }

        tracing::trace!(
            nodes = builder.node_count(),
            edges = builder.edge_count(),
            "built sentence graph"
        );
        builder
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Weight of the edge `from`-`to`, if present
    pub fn edge_weight(&self, from: u32, to: u32) -> Option<f64> {
        self.nodes
            .get(from as usize)
            .and_then(|node| node.edges.get(&to).copied())
    }

    /// Iterate over nodes with their IDs
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
