//! Frozen adjacency for the ranker
//!
//! The builder's hash-map rows are flattened into contiguous arrays with each
//! row sorted by target id. For a complete graph over `n` units every row
//! holds `n - 1` entries, and each pair is stored once from each side.

use super::builder::GraphBuilder;

/// Read-only weighted graph in row-offset form
///
/// Row `i` spans `col_idx[row_ptr[i]..row_ptr[i + 1]]`. Node ids and
/// `labels` keep the builder's first-occurrence order.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    pub num_nodes: usize,
    /// Offsets into `col_idx` and `weights`, `num_nodes + 1` long
    pub row_ptr: Vec<usize>,
    pub col_idx: Vec<u32>,
    pub weights: Vec<f64>,
    /// Sum of each row's weights; the ranker divides by it
    pub total_weight: Vec<f64>,
    /// Word or sentence text of each node
    pub labels: Vec<String>,
}

impl CsrGraph {
    /// Freeze a builder, sorting each row by target id
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let entries = builder.edge_count() * 2;
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(entries);
        let mut weights = Vec::with_capacity(entries);
        let mut total_weight = Vec::with_capacity(num_nodes);
        let mut labels = Vec::with_capacity(num_nodes);

        row_ptr.push(0);
        for (_, node) in builder.nodes() {
            // Sorted rows keep iteration order independent of hashing
            let mut row: Vec<(u32, f64)> = node.edges.iter().map(|(&t, &w)| (t, w)).collect();
            row.sort_unstable_by_key(|&(target, _)| target);

            total_weight.push(row.iter().map(|&(_, w)| w).sum());
            col_idx.extend(row.iter().map(|&(target, _)| target));
            weights.extend(row.iter().map(|&(_, w)| w));
            row_ptr.push(col_idx.len());
            labels.push(node.label.clone());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            total_weight,
            labels,
        }
    }

    /// `(target, weight)` pairs of a node's row, in target order
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    pub fn label(&self, node: u32) -> &str {
        &self.labels[node as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Stored row entries; twice the number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Nodes whose row weight is not positive
    ///
    /// Covers the single-node graph and units whose every pairwise score is
    /// 0. The ranker spreads their score uniformly.
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.total_weight[n as usize] <= 0.0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
            labels: Vec::new(),
        }
    }
}
