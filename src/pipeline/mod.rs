//! Per-document pipeline
//!
//! [`runner::TextRank`] drives tokenization, graph construction, ranking and
//! selection. [`validation`] checks a configuration before a runner is built.

pub mod artifacts;
pub mod observer;
pub mod runner;
pub mod validation;
