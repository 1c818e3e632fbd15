use crate::config::CheckerConfig;
use crate::error::Result;
use crate::types::{DuplicateGroup, DuplicateReport};
use crate::utils::{display_json_value, percentage, truncate_str};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const MAX_CELL_WIDTH: usize = 24;

/// Duplicate analysis report for CLI and library output.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateSummaryReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Where the dataset came from (file path or a caller-chosen label)
    pub source: String,
    /// Key columns, in output order
    pub columns: Vec<String>,
    /// Name of the per-group count column
    pub count_column: String,
    /// Number of rows in the analyzed dataset
    pub total_rows: usize,
    /// Rows belonging to some duplicate group
    pub duplicate_count: u64,
    /// `duplicate_count` as a percentage of `total_rows`
    pub duplicate_percentage: f64,
    /// Number of distinct duplicated value-combinations
    pub group_count: usize,
    /// Duplicate groups, possibly cut to the configured limit
    pub groups: Vec<DuplicateGroup>,
    /// Whether `groups` was cut short
    pub truncated: bool,
}

/// Builds, renders and saves duplicate reports.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Build a summary report from an analysis result.
    pub fn build_summary_report(
        report: &DuplicateReport,
        source: &str,
        total_rows: usize,
        config: &CheckerConfig,
    ) -> Result<DuplicateSummaryReport> {
        let mut groups = report.groups()?;
        let group_count = groups.len();

        let truncated = match config.max_report_groups {
            Some(limit) if group_count > limit => {
                groups.truncate(limit);
                true
            }
            _ => false,
        };

        Ok(DuplicateSummaryReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.to_string(),
            columns: report.columns.as_slice().to_vec(),
            count_column: report.count_column.clone(),
            total_rows,
            duplicate_count: report.count,
            duplicate_percentage: percentage(report.count, total_rows),
            group_count,
            groups,
            truncated,
        })
    }

    /// Render a report as a human-readable table.
    pub fn render_text(summary: &DuplicateSummaryReport) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", "=".repeat(60)));
        out.push_str("DUPLICATE CHECK\n");
        out.push_str(&format!("{}\n", "=".repeat(60)));
        out.push_str(&format!("  Source:  {}\n", summary.source));
        out.push_str(&format!("  Columns: {}\n", summary.columns.join(", ")));
        out.push_str(&format!("  Rows:    {}\n", summary.total_rows));
        out.push_str(&format!(
            "  Duplicate rows: {} ({:.1}%) in {} groups\n",
            summary.duplicate_count, summary.duplicate_percentage, summary.group_count
        ));

        if summary.groups.is_empty() {
            out.push_str("\n  No duplicate rows found\n");
            return out;
        }

        let header: Vec<String> = summary
            .columns
            .iter()
            .map(|c| truncate_str(c, MAX_CELL_WIDTH))
            .chain(std::iter::once(summary.count_column.clone()))
            .collect();
        let rows: Vec<Vec<String>> = summary
            .groups
            .iter()
            .map(|group| {
                group
                    .values
                    .iter()
                    .map(|v| truncate_str(&display_json_value(v), MAX_CELL_WIDTH))
                    .chain(std::iter::once(group.number_of_duplicates.to_string()))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        out.push('\n');
        out.push_str(&format_row(&header, &widths));
        out.push_str(&format!(
            "  {}\n",
            "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1))
        ));
        for row in &rows {
            out.push_str(&format_row(row, &widths));
        }

        if summary.truncated {
            out.push_str(&format!(
                "  ... {} more groups not shown\n",
                summary.group_count - summary.groups.len()
            ));
        }

        out
    }

    /// Write a report to a JSON file.
    ///
    /// If `report_base_name` is "train", the file will be "train_duplicates.json".
    pub fn write_report_to_file(
        &self,
        summary: &DuplicateSummaryReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_duplicates.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(summary)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("  {}\n", line.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::DuplicateAnalyzer;
    use polars::prelude::*;

    fn reference_df() -> DataFrame {
        df![
            "col_1" => ["A", "A", "A", "B", "B", "B", "A"],
            "col_2" => ["a", "b", "c", "a", "b", "c", "a"],
        ]
        .unwrap()
    }

    #[test]
    fn test_build_summary_report() {
        let df = reference_df();
        let report = DuplicateAnalyzer::count_and_sample(&df, &["col_1"]).unwrap();

        let summary = ReportGenerator::build_summary_report(
            &report,
            "reference",
            df.height(),
            &CheckerConfig::default(),
        )
        .unwrap();

        assert_eq!(summary.duplicate_count, 7);
        assert_eq!(summary.group_count, 2);
        assert_eq!(summary.duplicate_percentage, 100.0);
        assert!(!summary.truncated);
        assert_eq!(summary.groups[0].values, vec![serde_json::json!("A")]);
        assert_eq!(summary.groups[0].number_of_duplicates, 4);
    }

    #[test]
    fn test_group_limit_truncates() {
        let df = reference_df();
        let report = DuplicateAnalyzer::count_and_sample(&df, &["col_1"]).unwrap();
        let config = CheckerConfig::builder()
            .max_report_groups(Some(1))
            .build()
            .unwrap();

        let summary =
            ReportGenerator::build_summary_report(&report, "reference", df.height(), &config)
                .unwrap();

        assert!(summary.truncated);
        assert_eq!(summary.groups.len(), 1);
        // Totals still cover every group.
        assert_eq!(summary.group_count, 2);
        assert_eq!(summary.duplicate_count, 7);

        let text = ReportGenerator::render_text(&summary);
        assert!(text.contains("1 more groups not shown"));
    }

    #[test]
    fn test_render_text_lists_groups() {
        let df = reference_df();
        let report = DuplicateAnalyzer::count_and_sample(&df, &["col_1", "col_2"]).unwrap();
        let summary = ReportGenerator::build_summary_report(
            &report,
            "reference",
            df.height(),
            &CheckerConfig::default(),
        )
        .unwrap();

        let text = ReportGenerator::render_text(&summary);

        assert!(text.contains("Duplicate rows: 2"));
        assert!(text.contains("number_of_duplicates"));
        assert!(text.lines().any(|line| line.trim() == "A      a      2"));
    }

    #[test]
    fn test_render_text_no_duplicates() {
        let df = df!["id" => [1, 2, 3]].unwrap();
        let report = DuplicateAnalyzer::count_and_sample(&df, &["id"]).unwrap();
        let summary = ReportGenerator::build_summary_report(
            &report,
            "ids",
            df.height(),
            &CheckerConfig::default(),
        )
        .unwrap();

        assert!(ReportGenerator::render_text(&summary).contains("No duplicate rows found"));
    }

    #[test]
    fn test_report_serialization() {
        let df = reference_df();
        let report = DuplicateAnalyzer::count_and_sample(&df, &["col_1"]).unwrap();
        let summary = ReportGenerator::build_summary_report(
            &report,
            "reference",
            df.height(),
            &CheckerConfig::default(),
        )
        .unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["duplicate_count"], 7);
        assert_eq!(json["groups"][1]["values"][0], "B");
        assert_eq!(json["groups"][1]["number_of_duplicates"], 3);
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = std::env::temp_dir().join(format!("dup_checker_report_{}", std::process::id()));
        let df = reference_df();
        let report = DuplicateAnalyzer::count_and_sample(&df, &["col_1"]).unwrap();
        let summary = ReportGenerator::build_summary_report(
            &report,
            "reference",
            df.height(),
            &CheckerConfig::default(),
        )
        .unwrap();

        let path = ReportGenerator::new(dir.clone())
            .write_report_to_file(&summary, "reference")
            .unwrap();

        assert!(path.ends_with("reference_duplicates.json"));
        let written: DuplicateSummaryReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.duplicate_count, 7);

        fs::remove_dir_all(dir).ok();
    }
}
