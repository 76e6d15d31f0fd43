//! Pipeline artifacts.
//!
//! Typed intermediate and final results flowing out of the runner.
//! [`RankedGraph`] is the hand-off between ranking and selection;
//! [`DocumentOutput`] is the public result for one document.

use serde::Serialize;

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use crate::types::{KeyphraseSet, Summary};

/// A graph together with the scores computed over it
#[derive(Debug, Clone)]
pub struct RankedGraph {
    pub graph: CsrGraph,
    pub ranks: PageRankResult,
}

impl RankedGraph {
    pub fn new(graph: CsrGraph, ranks: PageRankResult) -> Self {
        Self { graph, ranks }
    }

    /// An empty graph with an empty ranking
    pub fn empty() -> Self {
        Self::new(CsrGraph::default(), PageRankResult::new(Vec::new(), 0, 0.0, true))
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes
    }

    /// `(label, score)` pairs, best first
    pub fn ranked_labels(&self) -> Vec<(&str, f64)> {
        self.ranks
            .ranked()
            .into_iter()
            .map(|(node, score)| (self.graph.label(node), score))
            .collect()
    }
}

/// Keyphrases and summary for one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentOutput {
    pub keyphrases: Vec<String>,
    pub summary: String,
}

impl DocumentOutput {
    pub fn new(keyphrases: &KeyphraseSet, summary: &Summary) -> Self {
        Self {
            keyphrases: keyphrases.iter().map(str::to_string).collect(),
            summary: summary.text(),
        }
    }
}
