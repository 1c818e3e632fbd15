//! Custom error types for duplicate checking.
//!
//! This module provides the error hierarchy using `thiserror`. Argument
//! validation failures each get their own variant so callers can tell a
//! malformed request apart from a failure inside Polars.
//!
//! Errors are serializable, so they can be embedded in JSON output alongside
//! reports.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for duplicate checking.
#[derive(Error, Debug)]
pub enum DuplicateCheckError {
    /// The dataset argument is not a valid tabular structure.
    #[error("Invalid argument: input is not a table: {0}")]
    NotATable(String),

    /// The columns argument is not a sequence of strings.
    #[error("Invalid argument: 'columns' must be a list of strings ({0})")]
    ColumnsNotAStringList(String),

    /// The columns argument has zero length.
    #[error("Invalid argument: 'columns' list cannot be empty")]
    ColumnsEmpty,

    /// One or more requested columns are absent from the dataset.
    #[error("Invalid argument: missing columns in dataset: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A key column has the same name as the count column.
    #[error("Invalid argument: column '{0}' clashes with the duplicate count column")]
    CountColumnConflict(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DuplicateCheckError>,
    },
}

impl DuplicateCheckError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DuplicateCheckError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for machine consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotATable(_) => "NOT_A_TABLE",
            Self::ColumnsNotAStringList(_) => "COLUMNS_NOT_A_STRING_LIST",
            Self::ColumnsEmpty => "COLUMNS_EMPTY",
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::CountColumnConflict(_) => "COUNT_COLUMN_CONFLICT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by a malformed argument rather than
    /// a failure while computing the result.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::NotATable(_)
            | Self::ColumnsNotAStringList(_)
            | Self::ColumnsEmpty
            | Self::MissingColumns(_)
            | Self::CountColumnConflict(_) => true,
            Self::WithContext { source, .. } => source.is_invalid_argument(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for DuplicateCheckError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DuplicateCheckError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for duplicate checking operations.
pub type Result<T> = std::result::Result<T, DuplicateCheckError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DuplicateCheckError::Polars(e).with_context(context))
    }
}
