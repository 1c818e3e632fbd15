//! Report generation module.
//!
//! Turns a [`DuplicateReport`](crate::types::DuplicateReport) into a
//! [`DuplicateSummaryReport`] suitable for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - A plain-text table for terminals
//!
//! # Example
//!
//! ```rust,ignore
//! use dup_checker::reporting::ReportGenerator;
//!
//! let summary = ReportGenerator::build_summary_report(&report, "data.csv", df.height(), &config)?;
//! println!("{}", ReportGenerator::render_text(&summary));
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.write_report_to_file(&summary, "data")?;
//! ```

mod generator;

pub use generator::{DuplicateSummaryReport, ReportGenerator};
