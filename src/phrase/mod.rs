//! Phrase extraction components
//!
//! This module merges ranked keywords back into multi-word keyphrases.

pub mod merger;
