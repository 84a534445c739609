//! Weighted PageRank by power iteration
//!
//! Each node passes `damping` of its score to its neighbors in proportion
//! to edge weight; the remainder teleports uniformly. Nodes with no edges
//! spread their whole score uniformly, so a graph with no edges at all
//! ranks every node equally.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;
use crate::types::RankConfig;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from ranking settings
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.convergence_threshold,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run PageRank on a graph.
    ///
    /// Stops when the L1 change between iterations drops to `threshold` or
    /// after `max_iterations`. Hitting the iteration cap is not an error: the
    /// last scores are returned with `converged == false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(Vec::new(), 0, 0.0, true);
        }

        let dangling = graph.dangling_nodes();
        let mut scores = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;
            self.step(graph, &dangling, &scores, &mut next);

            delta = scores
                .iter()
                .zip(&next)
                .map(|(old, new)| (old - new).abs())
                .sum();
            std::mem::swap(&mut scores, &mut next);
        }

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            scores.iter_mut().for_each(|s| *s /= sum);
        }

        tracing::trace!(iterations, delta, "pagerank finished");
        PageRankResult::new(scores, iterations, delta, delta <= self.threshold)
    }

    /// One power-iteration step from `scores` into `next`
    fn step(&self, graph: &CsrGraph, dangling: &[u32], scores: &[f64], next: &mut [f64]) {
        let n = scores.len() as f64;
        let dangling_mass: f64 = dangling.iter().map(|&d| scores[d as usize]).sum();
        next.fill((1.0 - self.damping) / n + self.damping * dangling_mass / n);

        for (node, &score) in scores.iter().enumerate() {
            let total = graph.node_total_weight(node as u32);
            if total <= 0.0 {
                continue;
            }
            let share = self.damping * score / total;
            for (neighbor, weight) in graph.neighbors(node as u32) {
                next[neighbor as usize] += share * weight;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_triangle_graph() -> CsrGraph {
        let mut builder = GraphBuilder::with_nodes(3);
        builder.add_edge(0, 1, 1.0);
        builder.add_edge(1, 2, 1.0);
        builder.add_edge(2, 0, 1.0);
        CsrGraph::from_builder(&builder)
    }

    fn build_star_graph() -> CsrGraph {
        // Hub (0) connected to 3 spokes
        let mut builder = GraphBuilder::with_nodes(4);
        for spoke in 1..4 {
            builder.add_edge(0, spoke, 1.0);
        }
        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_triangle_graph_equal_scores() {
        let result = StandardPageRank::new().run(&build_triangle_graph());

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_star_graph_hub_highest() {
        let result = StandardPageRank::new().run(&build_star_graph());

        assert!(result.converged);
        let hub_score = result.scores[0];
        for &score in &result.scores[1..] {
            assert!(hub_score > score);
        }
    }

    #[test]
    fn test_scores_sum_to_one() {
        let result = StandardPageRank::new().run(&build_star_graph());

        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(result.scores.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_edgeless_graph_is_uniform() {
        let graph = CsrGraph::from_builder(&GraphBuilder::with_nodes(4));
        let result = StandardPageRank::new().run(&graph);

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_heavier_edges_pull_more_score() {
        let mut builder = GraphBuilder::with_nodes(3);
        builder.add_edge(0, 1, 0.9);
        builder.add_edge(0, 2, 0.1);
        let result = StandardPageRank::new().run(&CsrGraph::from_builder(&builder));

        assert!(result.scores[1] > result.scores[2]);
    }

    #[test]
    fn test_empty_graph() {
        let result = StandardPageRank::new().run(&CsrGraph::default());

        assert!(result.converged);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let pr = StandardPageRank::new()
            .with_max_iterations(1)
            .with_threshold(0.0);
        let result = pr.run(&build_star_graph());

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_damping_factor() {
        let graph = build_star_graph();

        let low = StandardPageRank::new().with_damping(0.5).run(&graph);
        let high = StandardPageRank::new().with_damping(0.95).run(&graph);

        let advantage_low = low.scores[0] - low.scores[1];
        let advantage_high = high.scores[0] - high.scores[1];
        assert!(advantage_high > advantage_low);
    }

    #[test]
    fn test_from_config() {
        let config = RankConfig {
            damping: 0.7,
            max_iterations: 10,
            convergence_threshold: 1e-4,
        };
        let pr = StandardPageRank::from_config(&config);

        assert_eq!(pr.damping, 0.7);
        assert_eq!(pr.max_iterations, 10);
        assert_eq!(pr.threshold, 1e-4);
    }
}
