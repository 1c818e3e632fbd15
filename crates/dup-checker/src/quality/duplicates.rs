use crate::config::{CheckerConfig, ValidationPolicy};
use crate::error::{DuplicateCheckError, Result, ResultExt};
use crate::types::{ColumnKeyList, DuplicateReport};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Finds rows that repeat a value-combination over a set of key columns.
///
/// The analyzer holds only its configuration, so one instance can be shared
/// freely across threads and reused for any number of datasets.
#[derive(Debug, Clone, Default)]
pub struct DuplicateAnalyzer {
    config: CheckerConfig,
}

static_assertions::assert_impl_all!(DuplicateAnalyzer: Send, Sync);

impl DuplicateAnalyzer {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Analyze `df` over `columns` with the default (strict) configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let report = DuplicateAnalyzer::count_and_sample(&df, &["col_1", "col_2"])?;
    /// println!("{} duplicate rows in {} groups", report.count, report.group_count());
    /// ```
    pub fn count_and_sample<S: AsRef<str>>(
        df: &DataFrame,
        columns: &[S],
    ) -> Result<DuplicateReport> {
        let columns = ColumnKeyList::new(columns.iter().map(|c| c.as_ref().to_string()))?;
        Self::default().analyze(df, &columns)
    }

    /// Count duplicate rows of `df` restricted to `columns` and summarize them
    /// per value-combination.
    ///
    /// Rows match when every key column holds an equal value; nulls compare
    /// equal to each other. Each combination seen in two or more rows becomes
    /// one row of `samples`, with the full number of rows sharing it in the
    /// count column. Groups are sorted ascending by the key columns in the
    /// given order, nulls last. `count` is the sum of all group sizes.
    ///
    /// An empty dataset always yields an empty report. Missing key columns
    /// fail with [`DuplicateCheckError::MissingColumns`] under
    /// [`ValidationPolicy::Strict`] and yield an empty report under
    /// [`ValidationPolicy::Lenient`].
    pub fn analyze(&self, df: &DataFrame, columns: &ColumnKeyList) -> Result<DuplicateReport> {
        self.config.validate()?;
        let count_column = self.config.count_column.as_str();

        if let Some(conflict) = columns.iter().find(|name| name.as_str() == count_column) {
            return Err(DuplicateCheckError::CountColumnConflict(conflict.clone()));
        }

        if df.height() == 0 {
            debug!("Dataset is empty, nothing to check");
            return self.empty_report(df, columns);
        }

        let missing = columns.missing_from(df);
        if !missing.is_empty() {
            match self.config.validation_policy {
                ValidationPolicy::Strict => {
                    return Err(DuplicateCheckError::MissingColumns(missing));
                }
                ValidationPolicy::Lenient => {
                    warn!(
                        "Columns {:?} not found in dataset, reporting no duplicates",
                        missing
                    );
                    return self.empty_report(df, columns);
                }
            }
        }

        debug!(
            "Checking {} rows for duplicates over {:?}",
            df.height(),
            columns.as_slice()
        );

        let samples = self
            .group_duplicates(df, columns)
            .context("Failed to group duplicate rows")?;
        let count = total_count(&samples, count_column)?;

        info!(
            "Found {} duplicate rows in {} groups",
            count,
            samples.height()
        );

        Ok(DuplicateReport {
            count,
            samples,
            columns: columns.clone(),
            count_column: count_column.to_string(),
        })
    }

    /// Group rows by the key columns and keep groups of two or more rows.
    fn group_duplicates(&self, df: &DataFrame, columns: &ColumnKeyList) -> PolarsResult<DataFrame> {
        let count_column = self.config.count_column.as_str();
        let keys: Vec<Expr> = columns.iter().map(|name| col(name.as_str())).collect();

        let mut lf = df.clone().lazy();
        if self.config.project_first {
            lf = lf.select(&keys);
        }

        lf.group_by(&keys)
            .agg([len().cast(DataType::UInt64).alias(count_column)])
            .filter(col(count_column).gt(lit(1u64)))
            .sort_by_exprs(
                &keys,
                SortMultipleOptions::default()
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .collect()
    }

    /// Zero-row summary with the key columns plus the count column.
    ///
    /// Key columns present in `df` keep their dtype; absent ones are typed `Null`.
    fn empty_report(&self, df: &DataFrame, columns: &ColumnKeyList) -> Result<DuplicateReport> {
        let count_column = self.config.count_column.as_str();

        let mut empty_columns: Vec<Column> = columns
            .iter()
            .map(|name| {
                let dtype = df
                    .column(name)
                    .map(|c| c.dtype().clone())
                    .unwrap_or(DataType::Null);
                Column::from(Series::new_empty(name.as_str().into(), &dtype))
            })
            .collect();
        empty_columns.push(Column::from(Series::new_empty(
            count_column.into(),
            &DataType::UInt64,
        )));

        Ok(DuplicateReport {
            count: 0,
            samples: DataFrame::new(empty_columns)?,
            columns: columns.clone(),
            count_column: count_column.to_string(),
        })
    }
}

fn total_count(samples: &DataFrame, count_column: &str) -> Result<u64> {
    let counts = samples.column(count_column)?.as_materialized_series().u64()?;
    Ok(counts.into_iter().flatten().sum())
}
