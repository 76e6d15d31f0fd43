//! ROUGE evaluation of generated summaries
//!
//! Both texts are lowercased and split into Unicode words. ROUGE-N counts
//! overlapping n-grams with clipped counts; ROUGE-L uses the longest common
//! subsequence of the two word sequences.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Precision, recall and F1 for one granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub f: f64,
    pub p: f64,
    pub r: f64,
}

impl Score {
    /// Score from an overlap count and the two sequence lengths
    pub fn from_counts(overlap: usize, candidate_len: usize, reference_len: usize) -> Self {
        let p = ratio(overlap, candidate_len);
        let r = ratio(overlap, reference_len);
        let f = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };
        Self { f, p, r }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// ROUGE-1, ROUGE-2 and ROUGE-L for one candidate/reference pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RougeScores {
    #[serde(rename = "rouge-1")]
    pub rouge_1: Score,
    #[serde(rename = "rouge-2")]
    pub rouge_2: Score,
    #[serde(rename = "rouge-l")]
    pub rouge_l: Score,
}

impl RougeScores {
    pub fn compute(candidate: &str, reference: &str) -> Self {
        let candidate = words(candidate);
        let reference = words(reference);
        Self {
            rouge_1: rouge_n(&candidate, &reference, 1),
            rouge_2: rouge_n(&candidate, &reference, 2),
            rouge_l: rouge_l(&candidate, &reference),
        }
    }

    /// Component-wise mean; all zeros for an empty batch
    pub fn mean(scores: &[RougeScores]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let n = scores.len() as f64;
        let avg = |pick: fn(&RougeScores) -> Score| {
            let (f, p, r) = scores.iter().map(pick).fold((0.0, 0.0, 0.0), |acc, s| {
                (acc.0 + s.f, acc.1 + s.p, acc.2 + s.r)
            });
            Score {
                f: f / n,
                p: p / n,
                r: r / n,
            }
        };
        Self {
            rouge_1: avg(|s| s.rouge_1),
            rouge_2: avg(|s| s.rouge_2),
            rouge_l: avg(|s| s.rouge_l),
        }
    }
}

/// Lowercased word tokens
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

/// ROUGE-N over pre-tokenized sequences
pub fn rouge_n<S: AsRef<str>>(candidate: &[S], reference: &[S], n: usize) -> Score {
    let candidate_grams = ngram_counts(candidate, n);
    let reference_grams = ngram_counts(reference, n);

    let overlap: usize = candidate_grams
        .iter()
        .map(|(gram, &count)| count.min(reference_grams.get(gram).copied().unwrap_or(0)))
        .sum();

    Score::from_counts(
        overlap,
        candidate.len().saturating_sub(n.saturating_sub(1)),
        reference.len().saturating_sub(n.saturating_sub(1)),
    )
}

/// ROUGE-L over pre-tokenized sequences
pub fn rouge_l<S: AsRef<str>>(candidate: &[S], reference: &[S]) -> Score {
    Score::from_counts(lcs_len(candidate, reference), candidate.len(), reference.len())
}

fn ngram_counts<S: AsRef<str>>(tokens: &[S], n: usize) -> FxHashMap<Vec<&str>, usize> {
    let mut counts = FxHashMap::default();
    if n == 0 {
        return counts;
    }
    for window in tokens.windows(n) {
        let gram: Vec<&str> = window.iter().map(|t| t.as_ref()).collect();
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Length of the longest common subsequence
pub fn lcs_len<S: AsRef<str>>(a: &[S], b: &[S]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x.as_ref() == y.as_ref() {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_identical_texts_score_one() {
        let scores = RougeScores::compute("The cat sat on the mat.", "the cat sat on the mat");
        for score in [scores.rouge_1, scores.rouge_2, scores.rouge_l] {
            assert_close(score.f, 1.0);
            assert_close(score.p, 1.0);
            assert_close(score.r, 1.0);
        }
    }

    #[test]
    fn test_rouge_1_partial_overlap() {
        let candidate = words("the cat was found under the bed");
        let reference = words("the cat was under the bed");

        let score = rouge_n(&candidate, &reference, 1);
        assert_close(score.p, 6.0 / 7.0);
        assert_close(score.r, 1.0);
    }

    #[test]
    fn test_clipped_counts() {
        let score = rouge_n(&["the", "the", "the"], &["the", "cat"], 1);
        assert_close(score.p, 1.0 / 3.0);
        assert_close(score.r, 1.0 / 2.0);
    }

    #[test]
    fn test_rouge_2() {
        let score = rouge_n(&["a", "b", "c"], &["a", "b", "d"], 2);
        assert_close(score.p, 0.5);
        assert_close(score.r, 0.5);
        assert_close(score.f, 0.5);
    }

    #[test]
    fn test_lcs() {
        assert_eq!(lcs_len(&["a", "b", "c", "d"], &["a", "c", "d", "b"]), 3);
        assert_eq!(lcs_len::<&str>(&[], &["a"]), 0);
    }

    #[test]
    fn test_empty_inputs() {
        let scores = RougeScores::compute("", "reference text");
        assert_eq!(scores, RougeScores::default());

        let short = rouge_n(&["one"], &["one"], 2);
        assert_eq!(short, Score::default());
    }

    #[test]
    fn test_mean() {
        let perfect = RougeScores::compute("a b", "a b");
        let zero = RougeScores::compute("x y", "a b");
        let mean = RougeScores::mean(&[perfect, zero]);

        assert_close(mean.rouge_1.f, 0.5);
        assert_close(mean.rouge_l.r, 0.5);
        assert_eq!(RougeScores::mean(&[]), RougeScores::default());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(RougeScores::compute("a b", "a b")).unwrap();
        assert_eq!(json["rouge-1"]["f"], 1.0);
        assert!(json["rouge-2"]["p"].is_number());
        assert!(json["rouge-l"]["r"].is_number());
    }
}
