//! Pairwise scoring of text units
//!
//! Edge weights for the complete graph come from here. Two families exist:
//! distances (0 for identical units, larger for more different ones) and
//! affinities (larger for more similar units). The ranker always treats a
//! larger weight as a more likely transition, so the choice of measure
//! decides what the random walk is drawn towards.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Whether a weight grows with difference or with similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightDirection {
    Distance,
    Affinity,
}

/// Edge weighting for the sentence graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceSimilarity {
    /// Character-level Levenshtein distance, the same measure used for words
    #[default]
    EditDistance,
    /// Shared-word count normalized by log sentence lengths
    LexicalOverlap,
}

impl SentenceSimilarity {
    pub fn direction(&self) -> WeightDirection {
        match self {
            Self::EditDistance => WeightDirection::Distance,
            Self::LexicalOverlap => WeightDirection::Affinity,
        }
    }

    /// Score a pair of sentences
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Self::EditDistance => levenshtein(a, b) as f64,
            Self::LexicalOverlap => lexical_overlap(a, b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditDistance => "edit_distance",
            Self::LexicalOverlap => "lexical_overlap",
        }
    }
}

/// Levenshtein distance over Unicode scalar values
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic programme over the shorter string
    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };
    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Sentence overlap: `|Si ∩ Sj| / (ln|Si| + ln|Sj|)`
///
/// Words are compared case-insensitively. Returns 0 when the denominator
/// vanishes (both sentences have at most one word).
pub fn lexical_overlap(a: &str, b: &str) -> f64 {
    let words_a = word_set(a);
    let words_b = word_set(b);
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let shared = words_a.intersection(&words_b).count() as f64;
    let denominator = (words_a.len() as f64).ln() + (words_b.len() as f64).ln();
    if denominator <= 0.0 {
        return 0.0;
    }
    shared / denominator
}

fn word_set(sentence: &str) -> FxHashSet<String> {
    sentence.unicode_words().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_known_values() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_levenshtein_identity_and_symmetry() {
        assert_eq!(levenshtein("graph", "graph"), 0);
        assert_eq!(levenshtein("ranking", "rank"), levenshtein("rank", "ranking"));
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn test_lexical_overlap() {
        let a = "The cat sat on the mat";
        let b = "The dog sat on a log";
        let score = lexical_overlap(a, b);
        // shared: the, sat, on
        let expected = 3.0 / ((5.0_f64).ln() + (6.0_f64).ln());
        assert!((score - expected).abs() < 1e-12);
        assert!((score - lexical_overlap(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_lexical_overlap_degenerate() {
        assert_eq!(lexical_overlap("", "anything here"), 0.0);
        assert_eq!(lexical_overlap("one", "one"), 0.0);
    }

    #[test]
    fn test_sentence_similarity_direction() {
        assert_eq!(
            SentenceSimilarity::EditDistance.direction(),
            WeightDirection::Distance
        );
        assert_eq!(
            SentenceSimilarity::LexicalOverlap.direction(),
            WeightDirection::Affinity
        );
        assert_eq!(SentenceSimilarity::EditDistance.score("same", "same"), 0.0);
    }
}
