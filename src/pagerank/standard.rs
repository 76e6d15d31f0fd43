//! Standard PageRank algorithm
//!
//! Implements weighted PageRank with power iteration and proper handling of
//! dangling nodes.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;
use crate::types::TextRankConfig;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 change between iterations
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-4,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, iteration cap and threshold from a pipeline config
    pub fn from_config(config: &TextRankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.threshold,
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

    /// Run PageRank on a graph
    ///
    /// Each step follows an edge with probability proportional to its weight
    /// relative to the node's total incident weight. Mass sitting on dangling
    /// nodes is spread uniformly. Returns the result even if convergence
    /// wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        // Initialize scores uniformly
        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            new_scores.fill(teleport + dangling_contribution);

            // Propagate scores through edges
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        let contribution = self.damping * node_score * weight / total_weight;
                        new_scores[neighbor as usize] += contribution;
                    }
                }
            }

            // Calculate convergence delta (L1 norm)
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Normalize scores (they should already sum to ~1, but ensure numerical stability)
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        let converged = delta <= self.threshold;
        if !converged {
            tracing::warn!(
                iterations,
                delta,
                threshold = self.threshold,
                "pagerank stopped at the iteration cap before converging"
            );
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_triangle_graph() -> CsrGraph {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");

        builder.set_edge(a, b, 1.0);
        builder.set_edge(b, c, 1.0);
        builder.set_edge(c, a, 1.0);

        CsrGraph::from_builder(&builder)
    }

    fn build_star_graph() -> CsrGraph {
        // Hub connected to 3 spokes
        let mut builder = GraphBuilder::new();
        let hub = builder.get_or_create_node("hub");
        let s1 = builder.get_or_create_node("s1");
        let s2 = builder.get_or_create_node("s2");
        let s3 = builder.get_or_create_node("s3");

        builder.set_edge(hub, s1, 1.0);
        builder.set_edge(hub, s2, 1.0);
        builder.set_edge(hub, s3, 1.0);

        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_triangle_graph_equal_scores() {
        let graph = build_triangle_graph();
        let pr = StandardPageRank::new();
        let result = pr.run(&graph);

        assert!(result.converged);
        let expected = 1.0 / 3.0;
        for score in &result.scores {
            assert!((score - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_star_graph_hub_highest() {
        let graph = build_star_graph();
        let pr = StandardPageRank::new();
        let result = pr.run(&graph);

        assert!(result.converged);
        let hub_score = result.scores[0];
        for &score in &result.scores[1..] {
            assert!(hub_score > score);
        }
    }

    #[test]
    fn test_heavier_edges_attract_more_mass() {
        // a-b carries most of the weight; c hangs off a light edge
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");
        builder.set_edge(a, b, 10.0);
        builder.set_edge(a, c, 1.0);
        builder.set_edge(b, c, 1.0);

        let result = StandardPageRank::new().run(&CsrGraph::from_builder(&builder));

        assert!(result.scores[0] > result.scores[2]);
        assert!(result.scores[1] > result.scores[2]);
    }

    #[test]
    fn test_scores_sum_to_one() {
        for graph in [build_triangle_graph(), build_star_graph()] {
            let result = StandardPageRank::new().run(&graph);
            let sum: f64 = result.scores.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
            assert!(result.scores.iter().all(|&s| s >= 0.0));
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = CsrGraph::default();
        let pr = StandardPageRank::new();
        let result = pr.run(&graph);

        assert!(result.converged);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_single_node_gets_all_mass() {
        let mut builder = GraphBuilder::new();
        builder.get_or_create_node("alone");

        let result = StandardPageRank::new().run(&CsrGraph::from_builder(&builder));

        assert_eq!(result.scores.len(), 1);
        assert!((result.scores[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_edges_are_uniform() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        builder.set_edge(a, b, 0.0);

        let result = StandardPageRank::new().run(&CsrGraph::from_builder(&builder));

        assert!((result.scores[0] - 0.5).abs() < 1e-9);
        assert!((result.scores[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let graph = build_star_graph();
        let pr = StandardPageRank::new()
            .with_max_iterations(1)
            .with_threshold(0.0); // Never converge

        let result = pr.run(&graph);

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_damping_factor() {
        let graph = build_star_graph();

        // Lower damping = more teleportation = more uniform scores
        let result_low = StandardPageRank::new().with_damping(0.5).run(&graph);
        let result_high = StandardPageRank::new().with_damping(0.95).run(&graph);

        let hub_advantage_low = result_low.scores[0] - result_low.scores[1];
        let hub_advantage_high = result_high.scores[0] - result_high.scores[1];

        assert!(hub_advantage_high > hub_advantage_low);
    }

    #[test]
    fn test_from_config() {
        let config = TextRankConfig {
            damping: 0.7,
            max_iterations: 12,
            threshold: 1e-3,
            ..TextRankConfig::default()
        };
        let pr = StandardPageRank::from_config(&config);

        assert_eq!(pr.damping, 0.7);
        assert_eq!(pr.max_iterations, 12);
        assert_eq!(pr.threshold, 1e-3);
    }

    #[test]
    fn test_top_n() {
        let graph = build_star_graph();
        let result = StandardPageRank::new().run(&graph);

        let top_2 = result.top_n(2);
        assert_eq!(top_2.len(), 2);
        assert_eq!(top_2[0].0, 0);
    }
}
