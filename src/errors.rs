//! Error types for textrank-summarizer.

use std::fmt;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Which half of an article/summary pair is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    Article,
    Summary,
}

impl fmt::Display for PairSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairSide::Article => f.write_str("article"),
            PairSide::Summary => f.write_str("summary"),
        }
    }
}

/// Top-level error type.
///
/// Nothing inside the ranking algorithm itself fails; these variants cover
/// document I/O, dataset pairing, configuration and the graph-size guard.
#[derive(Debug, Error)]
pub enum TextRankError {
    /// A file could not be read or written.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid UTF-8.
    #[error("cannot decode {} as UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// The dataset has an article without a summary or the reverse.
    #[error("{category}/{id:03}: missing {missing}")]
    MissingPair {
        category: String,
        id: u32,
        missing: PairSide,
    },

    /// The document would produce a graph above the configured node limit.
    #[error("graph with {nodes} nodes exceeds the limit of {limit}")]
    GraphTooLarge { nodes: usize, limit: usize },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serde serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for textrank-summarizer operations.
pub type Result<T> = std::result::Result<T, TextRankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_pair_message() {
        let err = TextRankError::MissingPair {
            category: "tech".to_string(),
            id: 7,
            missing: PairSide::Summary,
        };
        assert_eq!(err.to_string(), "tech/007: missing summary");
    }

    #[test]
    fn test_graph_too_large_message() {
        let err = TextRankError::GraphTooLarge {
            nodes: 900,
            limit: 500,
        };
        assert!(err.to_string().contains("900"));
        assert!(err.to_string().contains("500"));
    }
}
