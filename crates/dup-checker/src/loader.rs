//! Dataset loading.
//!
//! Builds a [`DataFrame`] either from a CSV file on disk or from a JSON array
//! of records, and parses column lists received as JSON.

use crate::error::{DuplicateCheckError, Result, ResultExt};
use crate::types::ColumnKeyList;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Read a CSV file with a header row.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DuplicateCheckError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    debug!("Reading CSV from {}", path.display());

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .context(format!("Failed to read CSV file {}", path.display()))
}

/// Kind of values seen in one JSON column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonColumnKind {
    /// Only nulls so far.
    Unknown,
    Bool,
    Int,
    Float,
    Str,
}

impl JsonColumnKind {
    fn merge(self, value: &Value) -> Option<Self> {
        let seen = match value {
            Value::Null => return Some(self),
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() => Self::Int,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::Str,
            Value::Array(_) | Value::Object(_) => return None,
        };

        match (self, seen) {
            (Self::Unknown, kind) => Some(kind),
            (a, b) if a == b => Some(a),
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Some(Self::Float),
            // Mixed scalars fall back to their textual form.
            _ => Some(Self::Str),
        }
    }
}

/// Build a DataFrame from a JSON array of flat objects.
///
/// Columns come in the key order of the first record as `serde_json` stores
/// it (sorted unless its `preserve_order` feature is on). Every record must have
/// the same key set, and every value must be a string, number, boolean or
/// null; anything else is rejected with [`DuplicateCheckError::NotATable`].
///
/// A column holding both numbers and strings is read as strings.
pub fn dataframe_from_json_records(value: &Value) -> Result<DataFrame> {
    let records = value.as_array().ok_or_else(|| {
        DuplicateCheckError::NotATable(format!(
            "expected an array of records, got {}",
            kind_of(value)
        ))
    })?;

    let rows: Vec<&Map<String, Value>> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            record.as_object().ok_or_else(|| {
                DuplicateCheckError::NotATable(format!(
                    "record {} is {}, expected an object",
                    idx,
                    kind_of(record)
                ))
            })
        })
        .collect::<Result<_>>()?;

    let Some(first) = rows.first() else {
        return Ok(DataFrame::empty());
    };
    let names: Vec<&String> = first.keys().collect();

    for (idx, row) in rows.iter().enumerate() {
        if row.len() != names.len() || names.iter().any(|name| !row.contains_key(*name)) {
            return Err(DuplicateCheckError::NotATable(format!(
                "record {} has a different set of fields than record 0",
                idx
            )));
        }
    }

    let columns = names
        .iter()
        .map(|name| build_column(name, &rows))
        .collect::<Result<Vec<Column>>>()?;

    Ok(DataFrame::new(columns)?)
}

fn build_column(name: &str, rows: &[&Map<String, Value>]) -> Result<Column> {
    let values: Vec<&Value> = rows.iter().map(|row| &row[name]).collect();

    let mut kind = JsonColumnKind::Unknown;
    for value in &values {
        kind = kind.merge(value).ok_or_else(|| {
            DuplicateCheckError::NotATable(format!(
                "field '{}' holds a nested value, expected a scalar",
                name
            ))
        })?;
    }

    let name: PlSmallStr = name.into();
    let series = match kind {
        JsonColumnKind::Unknown => Series::full_null(name, values.len(), &DataType::Null),
        JsonColumnKind::Bool => {
            let data: Vec<Option<bool>> = values.iter().map(|v| v.as_bool()).collect();
            Series::new(name, data)
        }
        JsonColumnKind::Int => {
            let data: Vec<Option<i64>> = values.iter().map(|v| v.as_i64()).collect();
            Series::new(name, data)
        }
        JsonColumnKind::Float => {
            let data: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
            Series::new(name, data)
        }
        JsonColumnKind::Str => {
            let data: Vec<Option<String>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Series::new(name, data)
        }
    };

    Ok(series.into())
}

/// Parse a column list received as JSON.
///
/// Anything other than an array of strings is
/// [`DuplicateCheckError::ColumnsNotAStringList`]; an empty array is
/// [`DuplicateCheckError::ColumnsEmpty`].
pub fn parse_column_list(value: &Value) -> Result<ColumnKeyList> {
    let items = value.as_array().ok_or_else(|| {
        DuplicateCheckError::ColumnsNotAStringList(format!("got {}", kind_of(value)))
    })?;

    let names = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                DuplicateCheckError::ColumnsNotAStringList(format!(
                    "element {} is {}",
                    idx,
                    kind_of(item)
                ))
            })
        })
        .collect::<Result<Vec<String>>>()?;

    ColumnKeyList::new(names)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_to_dataframe() {
        let records = json!([
            {"name": "A", "score": 1, "ratio": 0.5, "flag": true},
            {"name": "B", "score": 2, "ratio": 1, "flag": null},
            {"name": null, "score": 3, "ratio": 2.5, "flag": false},
        ]);

        let df = dataframe_from_json_records(&records).unwrap();

        assert_eq!(df.shape(), (3, 4));
        assert_eq!(df.column("name").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("score").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("ratio").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("flag").unwrap().dtype(), &DataType::Boolean);
        assert_eq!(df.column("name").unwrap().null_count(), 1);
    }

    #[test]
    fn test_mixed_scalars_become_strings() {
        let records = json!([{"v": "A"}, {"v": 1}]);
        let df = dataframe_from_json_records(&records).unwrap();
        assert_eq!(df.column("v").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_empty_array_is_empty_table() {
        let df = dataframe_from_json_records(&json!([])).unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_not_a_table() {
        for bad in [
            json!("col_1"),
            json!({"col_1": "A"}),
            json!([1, 2, 3]),
            json!([{"a": [1, 2]}]),
            json!([{"a": 1}, {"b": 1}]),
        ] {
            let result = dataframe_from_json_records(&bad);
            assert!(
                matches!(result, Err(DuplicateCheckError::NotATable(_))),
                "expected NotATable for {}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_column_list() {
        let columns = parse_column_list(&json!(["col_1", "col_2"])).unwrap();
        assert_eq!(columns.as_slice(), &["col_1".to_string(), "col_2".to_string()]);
    }

    #[test]
    fn test_parse_column_list_rejects_string() {
        let result = parse_column_list(&json!("col_1"));
        assert!(matches!(
            result,
            Err(DuplicateCheckError::ColumnsNotAStringList(_))
        ));
    }

    #[test]
    fn test_parse_column_list_rejects_non_string_element() {
        let result = parse_column_list(&json!(["col_1", 2]));
        assert!(matches!(
            result,
            Err(DuplicateCheckError::ColumnsNotAStringList(_))
        ));
    }

    #[test]
    fn test_parse_column_list_rejects_empty() {
        let result = parse_column_list(&json!([]));
        assert!(matches!(result, Err(DuplicateCheckError::ColumnsEmpty)));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv("definitely/not/here.csv");
        assert_eq!(result.unwrap_err().error_code(), "IO_ERROR");
    }
}
