//! Keyphrase selection
//!
//! Ranked word nodes are cut down to the top `N / divisor + 1` and then
//! re-assembled into phrases: every maximal run of adjacent document tokens
//! that all belong to the kept set becomes one phrase, joined in reading
//! order with single spaces.

use rustc_hash::FxHashSet;

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use crate::types::{KeyphraseSet, TextRankConfig, Token};

/// Selects keyphrases from a ranked word graph
#[derive(Debug, Clone)]
pub struct KeyphraseSelector {
    keyword_divisor: usize,
}

impl Default for KeyphraseSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyphraseSelector {
    /// Create a selector keeping a third of the nodes, plus one
    pub fn new() -> Self {
        Self { keyword_divisor: 3 }
    }

    pub fn from_config(config: &TextRankConfig) -> Self {
        Self {
            keyword_divisor: config.keyword_divisor,
        }
    }

    /// Set the divisor applied to the node count
    pub fn with_keyword_divisor(mut self, divisor: usize) -> Self {
        self.keyword_divisor = divisor;
        self
    }

    /// Number of top-ranked nodes kept out of `node_count`
    pub fn keep_count(&self, node_count: usize) -> usize {
        if node_count == 0 {
            return 0;
        }
        (node_count / self.keyword_divisor.max(1) + 1).min(node_count)
    }

    /// Labels of the kept nodes, best first
    pub fn kept_words<'g>(&self, graph: &'g CsrGraph, ranks: &PageRankResult) -> Vec<&'g str> {
        ranks
            .top_n(self.keep_count(graph.num_nodes))
            .into_iter()
            .map(|(node, _)| graph.label(node))
            .collect()
    }

    /// Turn a ranked word graph into keyphrases over the document tokens
    pub fn select(
        &self,
        tokens: &[Token],
        graph: &CsrGraph,
        ranks: &PageRankResult,
    ) -> KeyphraseSet {
        let kept: FxHashSet<&str> = self.kept_words(graph, ranks).into_iter().collect();
        let words: Vec<&str> = tokens.iter().map(|t| t.normalized.as_str()).collect();
        merge_runs(&words, &kept)
    }
}

/// Join maximal runs of kept words into phrases
///
/// Scans `words` left to right. Phrases are inserted in order of first
/// appearance and repeated runs are skipped.
pub fn merge_runs(words: &[&str], kept: &FxHashSet<&str>) -> KeyphraseSet {
    let mut phrases = KeyphraseSet::new();
    let mut i = 0;

    while i < words.len() {
        if !kept.contains(words[i]) {
            i += 1;
            continue;
        }

        let start = i;
        while i < words.len() && kept.contains(words[i]) {
            i += 1;
        }
        phrases.insert(words[start..i].join(" "));
    }

    phrases
}
