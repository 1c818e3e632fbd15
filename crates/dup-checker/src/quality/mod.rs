//! Data quality checks.
//!
//! This module provides column-scoped duplicate detection: which rows share a
//! value-combination over a chosen set of columns, and how many rows each
//! combination covers.

mod duplicates;

pub use duplicates::DuplicateAnalyzer;
