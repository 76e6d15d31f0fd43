//! Core data types shared across the pipeline
//!
//! Tokens, the configuration record and the two output shapes
//! (keyphrase set and summary) live here so every stage can speak the same
//! vocabulary without depending on each other.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TextRankError};
use crate::similarity::SentenceSimilarity;

// ============================================================================
// Token
// ============================================================================

/// Coarse part-of-speech category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

impl PosTag {
    /// Map a Penn Treebank tag onto the coarse category
    ///
    /// Lets taggers that emit Penn tags (`NN`, `JJ`, `NNP`, ...) plug into the
    /// pipeline without knowing about [`PosTag`].
    pub fn from_penn(tag: &str) -> Self {
        match tag {
            "NN" | "NNS" => PosTag::Noun,
            "NNP" | "NNPS" => PosTag::ProperNoun,
            "JJ" | "JJR" | "JJS" => PosTag::Adjective,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" | "MD" => PosTag::Verb,
            "RB" | "RBR" | "RBS" | "WRB" => PosTag::Adverb,
            "PRP" | "PRP$" | "WP" | "WP$" => PosTag::Pronoun,
            "DT" | "PDT" | "WDT" => PosTag::Determiner,
            "IN" | "TO" => PosTag::Preposition,
            "CC" => PosTag::Conjunction,
            "CD" => PosTag::Numeral,
            "." | "," | ":" | "(" | ")" | "``" | "''" | "#" | "$" => PosTag::Punctuation,
            _ => PosTag::Other,
        }
    }
}

/// A word-token paired with its grammatical category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appears in the document
    pub text: String,
    /// Surface text with every `.` removed (`U.S.` -> `US`)
    pub normalized: String,
    /// Part-of-speech category
    pub pos: PosTag,
    /// Position in the document token sequence
    pub token_idx: usize,
}

impl Token {
    /// Create a token, deriving its normalized form from `text`
    pub fn new(text: impl Into<String>, pos: PosTag, token_idx: usize) -> Self {
        let text = text.into();
        let normalized = normalize(&text);
        Self {
            text,
            normalized,
            pos,
            token_idx,
        }
    }

    /// Whether the token survives the candidate filter for a given tag set
    pub fn is_candidate(&self, tags: &[PosTag]) -> bool {
        !self.normalized.is_empty() && tags.contains(&self.pos)
    }
}

/// Strip periods from a word
pub fn normalize(word: &str) -> String {
    word.replace('.', "")
}

// ============================================================================
// Configuration
// ============================================================================

/// Pipeline configuration
///
/// Every field has a default, so a partial JSON document (or `{}`) is a
/// valid configuration. Unknown fields are kept in `unknown_fields` and
/// surfaced as validation warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    /// Probability of following an edge rather than teleporting
    pub damping: f64,
    /// Iteration cap for the ranker
    pub max_iterations: usize,
    /// L1 convergence tolerance between consecutive iterations
    pub threshold: f64,
    /// Keep `N / keyword_divisor + 1` of the `N` ranked word nodes
    pub keyword_divisor: usize,
    /// Tags whose words become keyphrase candidates
    pub candidate_tags: Vec<PosTag>,
    /// Word budget for the summary
    pub summary_length: usize,
    /// Trim the summary back to the last word containing a period
    pub clean_sentences: bool,
    /// Language identifier forwarded to the sentence splitter and stopword lists
    pub language: String,
    /// Edge weighting used for the sentence graph
    pub sentence_similarity: SentenceSimilarity,
    /// Reject documents whose graph would exceed this many nodes
    pub max_nodes: Option<usize>,
    /// Node count above which graph rows are scored in parallel
    pub parallel_threshold: usize,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-4,
            keyword_divisor: 3,
            candidate_tags: vec![PosTag::Noun, PosTag::Adjective, PosTag::ProperNoun],
            summary_length: 100,
            clean_sentences: false,
            language: "english".to_string(),
            sentence_similarity: SentenceSimilarity::default(),
            max_nodes: None,
            parallel_threshold: 512,
            unknown_fields: HashMap::new(),
        }
    }
}

impl TextRankConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| TextRankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Deduplicated keyphrases in order of first appearance
///
/// Equality is set equality; insertion order only affects iteration.
#[derive(Debug, Clone, Default)]
pub struct KeyphraseSet {
    phrases: Vec<String>,
    seen: FxHashSet<String>,
}

impl PartialEq for KeyphraseSet {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Eq for KeyphraseSet {}

impl KeyphraseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a phrase, returning `false` if it was already present
    pub fn insert(&mut self, phrase: impl Into<String>) -> bool {
        let phrase = phrase.into();
        if self.seen.contains(&phrase) {
            return false;
        }
        self.seen.insert(phrase.clone());
        self.phrases.push(phrase);
        true
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.seen.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.phrases
    }
}

impl<S: Into<String>> FromIterator<S> for KeyphraseSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = KeyphraseSet::new();
        for phrase in iter {
            set.insert(phrase);
        }
        set
    }
}

/// A length-bounded extractive summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    words: Vec<String>,
}

impl Summary {
    pub fn from_words(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The summary as a single space-joined string
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
