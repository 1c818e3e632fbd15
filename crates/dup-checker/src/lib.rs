//! Column-scoped duplicate detection for tabular data.
//!
//! Given a Polars [`DataFrame`](polars::prelude::DataFrame) and a list of key
//! columns, this library finds the rows whose values over those columns occur
//! more than once and reports:
//!
//! - **count**: the total number of rows taking part in some duplicate group
//! - **samples**: one row per duplicated value-combination plus a
//!   `number_of_duplicates` column holding how many rows share it
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dup_checker::DuplicateAnalyzer;
//! use polars::prelude::*;
//!
//! let df = df![
//!     "col_1" => ["A", "A", "B", "B", "B"],
//!     "col_2" => ["a", "a", "a", "b", "c"],
//! ]?;
//!
//! let report = DuplicateAnalyzer::count_and_sample(&df, &["col_1"])?;
//! assert_eq!(report.count, 5);
//! println!("{}", report.samples);
//! ```
//!
//! # Validation
//!
//! With the default [`ValidationPolicy::Strict`], asking for a column the
//! dataset does not have fails with [`DuplicateCheckError::MissingColumns`].
//! [`ValidationPolicy::Lenient`] reports no duplicates instead:
//!
//! ```rust,ignore
//! use dup_checker::{CheckerConfig, ColumnKeyList, DuplicateAnalyzer, ValidationPolicy};
//!
//! let config = CheckerConfig::builder()
//!     .validation_policy(ValidationPolicy::Lenient)
//!     .build()?;
//!
//! let columns = ColumnKeyList::new(["invalid_column"])?;
//! let report = DuplicateAnalyzer::new(config).analyze(&df, &columns)?;
//! assert_eq!(report.count, 0);
//! ```
//!
//! An empty dataset always yields an empty report, whatever the policy.

pub mod config;
pub mod error;
pub mod loader;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CheckerConfig, CheckerConfigBuilder, ConfigValidationError, ValidationPolicy};
pub use error::{DuplicateCheckError, Result as DuplicateCheckResult, ResultExt};
pub use loader::{dataframe_from_json_records, load_csv, parse_column_list};
pub use quality::DuplicateAnalyzer;
pub use reporting::{DuplicateSummaryReport, ReportGenerator};
pub use types::{ColumnKeyList, DuplicateGroup, DuplicateReport};
