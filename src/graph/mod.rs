//! Graph construction and representation
//!
//! This module builds the complete weighted graph over text units and
//! converts it to a CSR layout for ranking.

pub mod builder;
pub mod csr;
