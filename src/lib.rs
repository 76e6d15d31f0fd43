//! # textrank-summarizer
//!
//! Graph-based keyphrase extraction and extractive summarization.
//!
//! A document is split into text units (candidate words or sentences), the
//! units become nodes of a complete weighted graph, PageRank scores the
//! nodes, and a selector turns the scores into a keyphrase set or a
//! length-bounded summary.
//!
//! ## Quick start
//!
//! ```rust
//! use textrank_summarizer::TextRank;
//!
//! let text = "Solar power is growing. Cheap solar panels make solar power attractive.";
//! let textrank = TextRank::new();
//!
//! let phrases = textrank.extract_key_phrases(text).unwrap();
//! let summary = textrank.extract_sentences(text).unwrap();
//! assert!(summary.word_count() <= textrank.config().summary_length);
//! # let _ = phrases;
//! ```
//!
//! Graph construction is quadratic in the number of distinct units. Set
//! [`TextRankConfig::max_nodes`] to reject oversized documents.

pub mod dataset;
pub mod errors;
pub mod eval;
pub mod graph;
pub mod nlp;
pub mod output;
pub mod pagerank;
pub mod phrase;
pub mod pipeline;
pub mod similarity;
pub mod summarizer;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, TextRankError};
pub use types::{KeyphraseSet, PosTag, Summary, TextRankConfig, Token};

// Re-export main functionality
pub use graph::{builder::GraphBuilder, csr::CsrGraph};
pub use nlp::{
    stopwords::StopwordFilter,
    tokenizer::{RuleTagger, Tagger},
};
pub use pagerank::{standard::StandardPageRank, PageRankResult};
pub use phrase::merger::KeyphraseSelector;
pub use pipeline::artifacts::DocumentOutput;
pub use pipeline::runner::TextRank;
pub use similarity::SentenceSimilarity;
pub use summarizer::selector::SentenceSelector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
