//! Natural Language Processing components
//!
//! This module provides the tokenizer/tagger capability and stopword lists.

pub mod stopwords;
pub mod tokenizer;
