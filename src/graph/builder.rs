//! Complete-graph builder
//!
//! Every unordered pair of distinct units gets exactly one undirected edge
//! weighted by a pairwise scorer. Construction is quadratic in the number of
//! nodes, which dominates the cost of the whole pipeline: callers should
//! filter and deduplicate units first, and can cap the node count through
//! `TextRankConfig::max_nodes`.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The text unit this node stands for
    pub label: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable undirected weighted graph keyed by unit text
///
/// Node IDs are assigned in first-seen order, so they double as the document
/// position used for tie-breaking downstream.
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps label -> node ID
    label_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            label_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given label, returning its ID
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.label_to_id.insert(label.to_string(), id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Set the weight of the edge between two nodes
    ///
    /// Self-loops are ignored. Setting an existing edge overwrites it in both
    /// directions, so there is never more than one edge per pair.
    pub fn set_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.insert(to, weight);
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            node.edges.insert(from, weight);
        }
    }

    /// Build the complete graph over `units`
    ///
    /// Repeated units collapse onto the node created for their first
    /// occurrence. `score` must be symmetric; it is evaluated once per
    /// unordered pair.
    pub fn complete<S, F>(units: &[S], score: F) -> Self
    where
        S: AsRef<str>,
        F: Fn(&str, &str) -> f64,
    {
        let mut builder = Self::with_nodes(units);
        let n = builder.node_count();

        for i in 0..n {
            for j in (i + 1)..n {
                let weight = score(&builder.nodes[i].label, &builder.nodes[j].label);
                builder.set_edge(i as u32, j as u32, weight);
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by label
    pub fn get_node_id(&self, label: &str) -> Option<u32> {
        self.label_to_id.get(label).copied()
    }

    /// Get the label for a node ID
    pub fn get_label(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.label.as_str())
    }

    /// Weight of the edge between two nodes, if any
    pub fn weight(&self, from: u32, to: u32) -> Option<f64> {
        self.get_node(from).and_then(|n| n.edges.get(&to).copied())
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn with_nodes<S: AsRef<str>>(units: &[S]) -> Self {
        let mut builder = Self::with_capacity(units.len());
        for unit in units {
            builder.get_or_create_node(unit.as_ref());
        }
        builder
    }
}

/// Number of distinct units in `units`
///
/// Lets callers enforce a node limit before paying for the quadratic build.
pub fn distinct_count<S: AsRef<str>>(units: &[S]) -> usize {
    let mut seen = rustc_hash::FxHashSet::default();
    units
        .iter()
        .map(AsRef::as_ref)
        .filter(|u| seen.insert(*u))
        .count()
}

/// Build the complete graph in parallel (for large unit sets)
///
/// Each row of the upper triangle is scored on the rayon pool and the rows
/// are then merged sequentially, so the result is identical to
/// [`GraphBuilder::complete`].
pub fn build_complete_parallel<S, F>(
    units: &[S],
    score: F,
    parallel_threshold: usize,
) -> GraphBuilder
where
    S: AsRef<str> + Sync,
    F: Fn(&str, &str) -> f64 + Sync,
{
    // For small inputs, sequential is faster
    if units.len() < parallel_threshold {
        return GraphBuilder::complete(units, score);
    }

    let mut builder = GraphBuilder::with_nodes(units);
    let labels: Vec<&str> = builder.nodes.iter().map(|n| n.label.as_str()).collect();
    let n = labels.len();

    let rows: Vec<Vec<(u32, u32, f64)>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| (i as u32, j as u32, score(labels[i], labels[j])))
                .collect()
        })
        .collect();

    for (from, to, weight) in rows.into_iter().flatten() {
        builder.set_edge(from, to, weight);
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::levenshtein;

    fn edit(a: &str, b: &str) -> f64 {
        levenshtein(a, b) as f64
    }

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("machine");
        let id_b = builder.get_or_create_node("learning");
        let id_c = builder.get_or_create_node("machine"); // duplicate

        assert_eq!(id_a, id_c);
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_set_edge_overwrites() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("machine");
        let id_b = builder.get_or_create_node("learning");

        builder.set_edge(id_a, id_b, 1.0);
        builder.set_edge(id_b, id_a, 4.0);

        assert_eq!(builder.weight(id_a, id_b), Some(4.0));
        assert_eq!(builder.weight(id_b, id_a), Some(4.0));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_complete_graph_edge_count() {
        let units = ["graph", "rank", "node", "edge", "walk"];
        let builder = GraphBuilder::complete(&units, edit);

        assert_eq!(builder.node_count(), 5);
        assert_eq!(builder.edge_count(), 10); // C(5, 2)
    }

    #[test]
    fn test_complete_graph_symmetric_weights() {
        let units = ["kitten", "sitting", "mitten", "bitten"];
        let builder = GraphBuilder::complete(&units, edit);

        for a in 0..4u32 {
            for b in 0..4u32 {
                if a != b {
                    assert_eq!(builder.weight(a, b), builder.weight(b, a));
                }
            }
        }
        assert_eq!(builder.weight(0, 1), Some(3.0));
    }

    #[test]
    fn test_duplicates_collapse() {
        let units = ["alpha", "beta", "alpha"];
        let builder = GraphBuilder::complete(&units, edit);

        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.edge_count(), 1);
        assert_eq!(distinct_count(&units), 2);
    }

    #[test]
    fn test_distinct_count_owned_units() {
        let units: Vec<String> = ["b", "a", "b", "c", "a"].map(String::from).to_vec();
        assert_eq!(distinct_count(&units), 3);
        assert_eq!(distinct_count::<&str>(&[]), 0);
    }

    #[test]
    fn test_single_and_empty_inputs() {
        let single = GraphBuilder::complete(&["only"], edit);
        assert_eq!(single.node_count(), 1);
        assert_eq!(single.edge_count(), 0);

        let empty: [&str; 0] = [];
        let builder = GraphBuilder::complete(&empty, edit);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::new();
        let id_a = builder.get_or_create_node("test");

        builder.set_edge(id_a, id_a, 1.0);

        let node = builder.get_node(id_a).unwrap();
        assert!(node.edges.is_empty());
    }

    #[test]
    fn test_node_ids_follow_first_occurrence() {
        let units = ["gamma", "alpha", "gamma", "beta"];
        let builder = GraphBuilder::complete(&units, edit);

        assert_eq!(builder.get_node_id("gamma"), Some(0));
        assert_eq!(builder.get_node_id("alpha"), Some(1));
        assert_eq!(builder.get_node_id("beta"), Some(2));
        assert_eq!(builder.get_label(2), Some("beta"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let units: Vec<String> = (0..40).map(|i| format!("word{}", i * 7)).collect();

        let sequential = GraphBuilder::complete(&units, edit);
        let parallel = build_complete_parallel(&units, edit, 8);

        assert_eq!(sequential.node_count(), parallel.node_count());
        assert_eq!(sequential.edge_count(), parallel.edge_count());
        for (id, node) in sequential.nodes() {
            for (&target, &weight) in &node.edges {
                assert_eq!(parallel.weight(id, target), Some(weight));
            }
        }
    }
}
