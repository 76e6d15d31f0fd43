//! Length-bounded summary selection
//!
//! Ranked sentences are concatenated best-first, cut to a word budget and
//! optionally trimmed back to the last word that carries a period.

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use crate::types::{Summary, TextRankConfig};

/// Configuration for sentence selection
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Maximum number of words in the summary
    pub summary_length: usize,
    /// Cut back to the last complete sentence inside the budget
    pub clean_sentences: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            summary_length: 100,
            clean_sentences: false,
        }
    }
}

/// Builds a summary from a ranked sentence graph
#[derive(Debug, Clone, Default)]
pub struct SentenceSelector {
    config: SelectorConfig,
}

impl SentenceSelector {
    /// Create a new selector with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &TextRankConfig) -> Self {
        Self::with_config(SelectorConfig {
            summary_length: config.summary_length,
            clean_sentences: config.clean_sentences,
        })
    }

    /// Set the word budget
    pub fn with_summary_length(mut self, summary_length: usize) -> Self {
        self.config.summary_length = summary_length;
        self
    }

    /// Enable or disable trimming to the last sentence boundary
    pub fn with_clean_sentences(mut self, clean_sentences: bool) -> Self {
        self.config.clean_sentences = clean_sentences;
        self
    }

    /// Select the summary from a ranked sentence graph
    ///
    /// Sentences with equal scores keep document order.
    pub fn select(&self, graph: &CsrGraph, ranks: &PageRankResult) -> Summary {
        let ranked: Vec<&str> = ranks
            .ranked()
            .into_iter()
            .map(|(node, _)| graph.label(node))
            .collect();
        self.truncate(&ranked)
    }

    /// Concatenate already-ranked sentences and apply the word budget
    pub fn truncate(&self, ranked_sentences: &[&str]) -> Summary {
        let mut words: Vec<String> = ranked_sentences
            .iter()
            .flat_map(|s| s.split_whitespace())
            .take(self.config.summary_length)
            .map(str::to_string)
            .collect();

        if self.config.clean_sentences {
            if let Some(last_dot) = words.iter().rposition(|w| w.contains('.')) {
                words.truncate(last_dot + 1);
            }
        }

        Summary::from_words(words)
    }
}
