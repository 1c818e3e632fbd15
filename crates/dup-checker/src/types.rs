use crate::error::{DuplicateCheckError, Result};
use crate::utils::any_value_to_json;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of distinct column names defining duplicate identity.
///
/// Order only affects the column order of the output; which rows match is
/// decided by the set of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnKeyList(Vec<String>);

impl ColumnKeyList {
    /// Build a key list, keeping the first occurrence of repeated names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in columns {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        if names.is_empty() {
            return Err(DuplicateCheckError::ColumnsEmpty);
        }

        Ok(Self(names))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a list built through `new`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Names in this list that are not columns of `df`.
    pub fn missing_from(&self, df: &DataFrame) -> Vec<String> {
        self.0
            .iter()
            .filter(|name| df.get_column_index(name).is_none())
            .cloned()
            .collect()
    }

    /// Output column names: the keys followed by `count_column`.
    pub fn with_count_column(&self, count_column: &str) -> Vec<String> {
        let mut names = self.0.clone();
        names.push(count_column.to_string());
        names
    }
}

impl TryFrom<Vec<String>> for ColumnKeyList {
    type Error = DuplicateCheckError;

    fn try_from(columns: Vec<String>) -> Result<Self> {
        Self::new(columns)
    }
}

impl From<ColumnKeyList> for Vec<String> {
    fn from(columns: ColumnKeyList) -> Self {
        columns.0
    }
}

impl<'a> IntoIterator for &'a ColumnKeyList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of a duplicate analysis.
#[derive(Debug, Clone)]
pub struct DuplicateReport {
    /// Total rows that belong to some duplicate group.
    pub count: u64,
    /// One row per duplicated value-combination, followed by its count column.
    pub samples: DataFrame,
    pub columns: ColumnKeyList,
    pub count_column: String,
}

impl DuplicateReport {
    pub fn group_count(&self) -> usize {
        self.samples.height()
    }

    pub fn has_duplicates(&self) -> bool {
        self.count > 0
    }

    /// Materialize `samples` as JSON-friendly groups, in output order.
    pub fn groups(&self) -> Result<Vec<DuplicateGroup>> {
        let counts = self
            .samples
            .column(&self.count_column)?
            .as_materialized_series()
            .u64()?
            .clone();

        let key_columns = self
            .columns
            .iter()
            .map(|name| self.samples.column(name))
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut groups = Vec::with_capacity(self.samples.height());
        for row_idx in 0..self.samples.height() {
            let values = key_columns
                .iter()
                .map(|col| col.get(row_idx).map(any_value_to_json))
                .collect::<PolarsResult<Vec<_>>>()?;

            groups.push(DuplicateGroup {
                values,
                number_of_duplicates: counts.get(row_idx).unwrap_or(0),
            });
        }

        Ok(groups)
    }
}

/// A single duplicated value-combination and how many rows share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub values: Vec<serde_json::Value>,
    pub number_of_duplicates: u64,
}
