//! Tokenization and part-of-speech tagging
//!
//! The pipeline only talks to the [`Tagger`] trait, so any tokenizer/tagger
//! that honours the three methods can be substituted. [`RuleTagger`] is the
//! built-in implementation: Unicode segmentation for words and sentences and
//! a small rule set for tags. It holds only read-only lexicons and can be
//! shared across threads.

use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::{is_english, StopwordFilter};
use crate::types::{PosTag, Token};

/// Tokenizer/tagger capability consumed by the pipeline
pub trait Tagger: Send + Sync {
    /// Split text into an ordered sequence of word tokens
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Assign a category to each word, preserving order
    fn tag(&self, words: &[String]) -> Vec<Token>;

    /// Split text into an ordered sequence of sentence strings
    fn split_sentences(&self, text: &str, language: &str) -> Vec<String>;
}

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd", "co",
    "corp", "gov", "gen", "col", "capt", "lt", "sgt", "rev", "no", "jan", "feb", "mar", "apr",
    "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "e.g", "i.e", "u.s", "u.k", "u.n",
    "a.m", "p.m",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "either", "neither",
    "some", "any", "no", "all", "both", "another", "such", "what", "which", "whose",
];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "amid", "among", "around", "as",
    "at", "before", "behind", "below", "beneath", "beside", "besides", "between", "beyond", "by",
    "despite", "down", "during", "except", "for", "from", "in", "inside", "into", "like", "near",
    "of", "off", "on", "onto", "out", "outside", "over", "past", "per", "since", "through",
    "throughout", "to", "toward", "towards", "under", "underneath", "until", "unlike", "up",
    "upon", "via", "with", "within", "without",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom",
    "someone", "somebody", "something", "anyone", "anything", "everyone", "everything",
    "nobody", "nothing",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "because", "although", "though", "while", "whereas",
    "if", "unless", "whether", "than", "once", "when", "where", "whenever", "wherever",
];

const AUXILIARIES: &[&str] = &[
    "be", "is", "am", "are", "was", "were", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "said", "says", "say", "get", "got", "make", "made", "take", "took", "go", "went",
    "come", "came", "see", "saw", "know", "knew", "think", "thought", "give", "gave", "want",
];

const ADVERBS: &[&str] = &[
    "not", "very", "also", "just", "only", "even", "still", "already", "now", "then", "there",
    "here", "too", "again", "ever", "never", "always", "often", "soon", "perhaps", "however",
    "almost", "quite", "rather", "instead", "why", "how", "more", "most", "much", "less", "least",
];

// Nouns the suffix rules would otherwise mistake for adverbs or verbs
const SUFFIX_EXCEPTIONS: &[&str] = &[
    "family", "supply", "rally", "assembly", "reply", "ally", "anomaly", "monopoly", "belly",
    "jelly", "bully", "hundred", "speed", "breed", "greed", "creed", "seed", "need", "bed",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "ic", "al",
];

/// Built-in rule-based tokenizer and tagger
#[derive(Debug, Clone)]
pub struct RuleTagger {
    abbreviations: FxHashSet<String>,
    closed_class: Option<StopwordFilter>,
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new("english")
    }
}

impl RuleTagger {
    /// Create a tagger for the given language
    ///
    /// English uses hand-written closed-class lexicons. Other languages tag
    /// stopwords as [`PosTag::Other`] and everything else by capitalisation.
    pub fn new(language: &str) -> Self {
        let closed_class = if is_english(language) {
            None
        } else {
            Some(StopwordFilter::new(language))
        };
        Self {
            abbreviations: ENGLISH_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            closed_class,
        }
    }

    /// Whether `word` (without its trailing period) is a known abbreviation
    /// or a single-letter initial
    fn is_abbreviation(&self, word: &str) -> bool {
        let word = word.trim_end_matches('.');
        let mut chars = word.chars();
        let single_initial =
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase());
        single_initial || self.abbreviations.contains(&word.to_lowercase())
    }

    fn tag_word(&self, word: &str, sentence_initial: bool, prev: Option<PosTag>) -> PosTag {
        if !word.chars().any(char::is_alphanumeric) {
            return PosTag::Punctuation;
        }
        if is_numeric(word) {
            return PosTag::Numeral;
        }

        let lower = word.to_lowercase();

        if let Some(stopwords) = &self.closed_class {
            if stopwords.is_stopword(&lower) {
                return PosTag::Other;
            }
            return if starts_upper(word) && !sentence_initial {
                PosTag::ProperNoun
            } else {
                PosTag::Noun
            };
        }

        if let Some(tag) = closed_class_tag(&lower) {
            return tag;
        }

        if is_acronym(word) || (starts_upper(word) && !sentence_initial) {
            return PosTag::ProperNoun;
        }

        suffix_tag(&lower, prev)
    }
}

impl Tagger for RuleTagger {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();

        for segment in text.split_word_bounds() {
            if segment.trim().is_empty() {
                continue;
            }
            // Re-attach the period of abbreviations like "U.S." and "Mr."
            if segment == "." {
                if let Some(last) = words.last_mut() {
                    if !last.ends_with('.')
                        && (is_dotted_initials(last) || self.is_abbreviation(last))
                    {
                        last.push('.');
                        continue;
                    }
                }
            }
            words.push(segment.to_string());
        }

        words
    }

    fn tag(&self, words: &[String]) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(words.len());
        let mut sentence_initial = true;
        let mut prev: Option<PosTag> = None;

        for (idx, word) in words.iter().enumerate() {
            let pos = self.tag_word(word, sentence_initial, prev);
            sentence_initial = matches!(word.as_str(), "." | "!" | "?")
                || (pos == PosTag::Punctuation && sentence_initial);
            prev = Some(pos);
            tokens.push(Token::new(word.clone(), pos, idx));
        }

        tokens
    }

    fn split_sentences(&self, text: &str, language: &str) -> Vec<String> {
        let english = is_english(language);
        let mut sentences: Vec<String> = Vec::new();
        let mut glue_next = false;

        for segment in text.trim().split_sentence_bounds() {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            match sentences.last_mut() {
                Some(last) if glue_next => {
                    last.push(' ');
                    last.push_str(segment);
                }
                _ => sentences.push(segment.to_string()),
            }

            // A segment ending in an abbreviation did not really end a sentence
            glue_next = segment
                .split_whitespace()
                .last()
                .map(|w| w.ends_with('.') && (english || w.len() == 2) && self.is_abbreviation(w))
                .unwrap_or(false);
        }

        sentences
    }
}

fn closed_class_tag(lower: &str) -> Option<PosTag> {
    let tag = if DETERMINERS.contains(&lower) {
        PosTag::Determiner
    } else if PREPOSITIONS.contains(&lower) {
        PosTag::Preposition
    } else if PRONOUNS.contains(&lower) {
        PosTag::Pronoun
    } else if CONJUNCTIONS.contains(&lower) {
        PosTag::Conjunction
    } else if AUXILIARIES.contains(&lower) {
        PosTag::Verb
    } else if ADVERBS.contains(&lower) {
        PosTag::Adverb
    } else if lower.contains('\'') && !lower.ends_with("'s") {
        // contractions: don't, we're, it'll
        PosTag::Other
    } else {
        return None;
    };
    Some(tag)
}

fn suffix_tag(lower: &str, prev: Option<PosTag>) -> PosTag {
    let len = lower.chars().count();
    let after_function_word = matches!(prev, Some(PosTag::Pronoun) | Some(PosTag::Verb));

    if SUFFIX_EXCEPTIONS.contains(&lower) {
        return PosTag::Noun;
    }

    if len > 4 && lower.ends_with("ly") {
        return PosTag::Adverb;
    }
    if len > 4 && lower.ends_with("ed") {
        return if matches!(prev, Some(PosTag::Determiner) | Some(PosTag::Adjective)) {
            PosTag::Adjective
        } else {
            PosTag::Verb
        };
    }
    if len > 4 && lower.ends_with("ing") && after_function_word {
        return PosTag::Verb;
    }
    if prev == Some(PosTag::Pronoun) && lower.ends_with('s') && !lower.ends_with("ss") {
        return PosTag::Verb;
    }
    if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PosTag::Adjective;
    }
    PosTag::Noun
}

/// Letter-dot forms such as `U.S` or `e.g`: short alphabetic pieces joined
/// by periods
fn is_dotted_initials(word: &str) -> bool {
    word.contains('.')
        && word.split('.').all(|piece| {
            (1..=2).contains(&piece.chars().count()) && piece.chars().all(char::is_alphabetic)
        })
}

fn is_numeric(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | '-' | '/'))
}

fn starts_upper(word: &str) -> bool {
    word.chars().next().map(char::is_uppercase).unwrap_or(false)
}

fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tagger: &RuleTagger, text: &str) -> Vec<(String, PosTag)> {
        let words = tagger.tokenize(text);
        tagger
            .tag(&words)
            .into_iter()
            .map(|t| (t.text, t.pos))
            .collect()
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        let tagger = RuleTagger::default();
        let words = tagger.tokenize("Graphs rank words, and sentences.");
        assert_eq!(words, vec!["Graphs", "rank", "words", ",", "and", "sentences", "."]);
    }

    #[test]
    fn test_tokenize_keeps_abbreviations() {
        let tagger = RuleTagger::default();
        let words = tagger.tokenize("The U.S. economy grew, said Mr. Smith.");
        assert_eq!(
            words,
            vec!["The", "U.S.", "economy", "grew", ",", "said", "Mr.", "Smith", "."]
        );
    }

    #[test]
    fn test_amount_does_not_swallow_sentence_period() {
        let tagger = RuleTagger::default();
        let words = tagger.tokenize("Profits rose to $1.13bn. Analysts cheered.");
        assert_eq!(
            words,
            vec!["Profits", "rose", "to", "$", "1.13bn", ".", "Analysts", "cheered", "."]
        );

        let tagged = tags(&tagger, "Profits rose to $1.13bn. Analysts cheered.");
        assert_eq!(tagged[6], ("Analysts".to_string(), PosTag::Noun));
    }

    #[test]
    fn test_dotted_initials() {
        assert!(is_dotted_initials("U.S"));
        assert!(is_dotted_initials("e.g"));
        assert!(!is_dotted_initials("1.13bn"));
        assert!(!is_dotted_initials("example.com"));
        assert!(!is_dotted_initials("word"));
    }

    #[test]
    fn test_tag_basic_categories() {
        let tagger = RuleTagger::default();
        let tagged = tags(&tagger, "The quick algorithm ranks 42 sentences in Berlin.");

        assert_eq!(tagged[0], ("The".to_string(), PosTag::Determiner));
        assert_eq!(tagged[2], ("algorithm".to_string(), PosTag::Noun));
        assert_eq!(tagged[4], ("42".to_string(), PosTag::Numeral));
        assert_eq!(tagged[6], ("in".to_string(), PosTag::Preposition));
        assert_eq!(tagged[7], ("Berlin".to_string(), PosTag::ProperNoun));
        assert_eq!(tagged[8], (".".to_string(), PosTag::Punctuation));
    }

    #[test]
    fn test_tag_suffix_rules() {
        let tagger = RuleTagger::default();
        let tagged = tags(&tagger, "a famous economic model quickly reported results");

        assert_eq!(tagged[1].1, PosTag::Adjective); // famous
        assert_eq!(tagged[2].1, PosTag::Adjective); // economic
        assert_eq!(tagged[3].1, PosTag::Noun); // model
        assert_eq!(tagged[4].1, PosTag::Adverb); // quickly
        assert_eq!(tagged[5].1, PosTag::Verb); // reported
    }

    #[test]
    fn test_sentence_initial_capital_is_not_proper() {
        let tagger = RuleTagger::default();
        let tagged = tags(&tagger, "Markets fell. Investors in London worried.");

        assert_eq!(tagged[0].1, PosTag::Noun); // Markets
        assert_eq!(tagged[3].1, PosTag::Noun); // Investors
        assert_eq!(tagged[5].1, PosTag::ProperNoun); // London
    }

    #[test]
    fn test_acronym_is_proper_noun() {
        let tagger = RuleTagger::default();
        let tagged = tags(&tagger, "BBC reported it.");
        assert_eq!(tagged[0].1, PosTag::ProperNoun);
    }

    #[test]
    fn test_split_sentences() {
        let tagger = RuleTagger::default();
        let sentences =
            tagger.split_sentences("First sentence here. Second one! Third? ", "english");
        assert_eq!(sentences, vec!["First sentence here.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_split_sentences_respects_abbreviations() {
        let tagger = RuleTagger::default();
        let sentences = tagger.split_sentences(
            "Mr. Brown met Dr. Green in the U.S. capital. They talked.",
            "english",
        );
        assert_eq!(
            sentences,
            vec!["Mr. Brown met Dr. Green in the U.S. capital.", "They talked."]
        );
    }

    #[test]
    fn test_split_sentences_empty() {
        let tagger = RuleTagger::default();
        assert!(tagger.split_sentences("   \n ", "english").is_empty());
    }

    #[test]
    fn test_non_english_uses_stopwords() {
        let tagger = RuleTagger::new("german");
        let tagged = tags(&tagger, "Die Maschine und das Lernen");

        assert_eq!(tagged[0].1, PosTag::Other); // Die
        assert_eq!(tagged[1].1, PosTag::ProperNoun); // Maschine
        assert_eq!(tagged[2].1, PosTag::Other); // und
    }

    #[test]
    fn test_tagger_is_object_safe() {
        let tagger: Box<dyn Tagger> = Box::new(RuleTagger::default());
        let words = tagger.tokenize("Ranking works.");
        assert_eq!(tagger.tag(&words).len(), 3);
    }
}
