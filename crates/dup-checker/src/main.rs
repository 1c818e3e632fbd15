//! CLI entry point for the duplicate checker.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use dup_checker::{
    CheckerConfig, ColumnKeyList, DuplicateAnalyzer, ReportGenerator, ValidationPolicy,
    dataframe_from_json_records, load_csv,
};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// CLI-compatible validation policy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliValidationPolicy {
    /// Fail when a requested column is missing
    Strict,
    /// Report no duplicates when a requested column is missing
    Lenient,
}

impl From<CliValidationPolicy> for ValidationPolicy {
    fn from(cli: CliValidationPolicy) -> Self {
        match cli {
            CliValidationPolicy::Strict => ValidationPolicy::Strict,
            CliValidationPolicy::Lenient => ValidationPolicy::Lenient,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Count and sample duplicate rows over a set of columns",
    long_about = "Finds rows that share the same values over the given columns and \
                  reports how many rows take part in duplicates, grouped by value.\n\n\
                  EXAMPLES:\n  \
                  # Duplicates by customer and date\n  \
                  dup-checker -i orders.csv -c customer_id,order_date\n\n  \
                  # JSON records input, machine-readable output\n  \
                  dup-checker -i rows.json -c email --json\n\n  \
                  # Save a JSON report next to the text summary\n  \
                  dup-checker -i orders.csv -c customer_id --emit-report reports/"
)]
struct Args {
    /// Path to the dataset (CSV with header, or a JSON array of records)
    #[arg(short, long)]
    input: PathBuf,

    /// Columns defining duplicate identity (comma separated)
    #[arg(short, long, value_delimiter = ',', required = true)]
    columns: Vec<String>,

    /// How to treat requested columns that are not in the dataset
    #[arg(long, value_enum, default_value = "strict")]
    policy: CliValidationPolicy,

    /// Name of the count column in the output
    #[arg(long, default_value = dup_checker::config::DEFAULT_COUNT_COLUMN)]
    count_column: String,

    /// Maximum number of groups to list (0 lists all)
    #[arg(long, default_value = "20")]
    max_groups: usize,

    /// Output JSON to stdout instead of the text summary
    ///
    /// Disables all logs; only the JSON report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to this directory
    ///
    /// The report will be saved as <input_name>_duplicates.json
    #[arg(short = 'r', long)]
    emit_report: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so that stdout only
/// carries the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = CheckerConfig::builder()
        .validation_policy(args.policy.into())
        .count_column(&args.count_column)
        .max_report_groups((args.max_groups > 0).then_some(args.max_groups))
        .build()?;

    let columns = ColumnKeyList::new(args.columns.iter().cloned())?;

    info!("Loading dataset from: {}", args.input.display());
    let data = load_dataset(&args.input)?;
    info!("Dataset loaded: {:?}", data.shape());

    let analyzer = DuplicateAnalyzer::new(config);
    let report = analyzer.analyze(&data, &columns).map_err(|e| {
        error!("Duplicate check failed: {}", e);
        anyhow!(e)
    })?;

    let source = args.input.display().to_string();
    let summary =
        ReportGenerator::build_summary_report(&report, &source, data.height(), analyzer.config())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(ref dir) = args.emit_report {
        let generator = ReportGenerator::new(dir.clone());
        let report_path = generator.write_report_to_file(&summary, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    print!("{}", ReportGenerator::render_text(&summary));

    Ok(())
}

/// Load a dataset, picking the reader from the file extension.
fn load_dataset(path: &Path) -> Result<DataFrame> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        Ok(dataframe_from_json_records(&value)?)
    } else {
        Ok(load_csv(path)?)
    }
}

/// File name without extension, used to name emitted reports.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}
