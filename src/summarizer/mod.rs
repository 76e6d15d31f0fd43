//! Summarization components
//!
//! Provides extractive summarization by truncating the ranked sentence list
//! to a word budget.

pub mod selector;
