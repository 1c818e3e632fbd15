//! Configuration types for duplicate checking.
//!
//! This module provides configuration options using the builder pattern.

use serde::{Deserialize, Serialize};

/// Name of the count column appended to the grouped summary.
pub const DEFAULT_COUNT_COLUMN: &str = "number_of_duplicates";

/// Default number of groups rendered in reports.
pub const DEFAULT_MAX_REPORT_GROUPS: usize = 20;

/// How the analyzer reacts to requests it cannot answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValidationPolicy {
    /// Reject missing columns with an error.
    /// An empty dataset still yields an empty result.
    #[default]
    Strict,
    /// Return an empty result for an empty dataset or missing columns.
    Lenient,
}

/// Configuration for the duplicate analyzer.
///
/// Use [`CheckerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use dup_checker::config::{CheckerConfig, ValidationPolicy};
///
/// let config = CheckerConfig::builder()
///     .validation_policy(ValidationPolicy::Lenient)
///     .max_report_groups(Some(50))
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// What to do with missing columns.
    /// Default: Strict
    pub validation_policy: ValidationPolicy,

    /// Name of the count column in the grouped summary.
    /// Default: "number_of_duplicates"
    pub count_column: String,

    /// Whether to project the dataset onto the key columns before grouping.
    /// Default: true
    pub project_first: bool,

    /// Maximum number of groups listed in a report. `None` lists all.
    /// Default: Some(20)
    pub max_report_groups: Option<usize>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            validation_policy: ValidationPolicy::default(),
            count_column: DEFAULT_COUNT_COLUMN.to_string(),
            project_first: true,
            max_report_groups: Some(DEFAULT_MAX_REPORT_GROUPS),
        }
    }
}

impl CheckerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CheckerConfigBuilder {
        CheckerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.count_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyCountColumn);
        }

        if self.max_report_groups == Some(0) {
            return Err(ConfigValidationError::InvalidMaxReportGroups);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Count column name must not be empty")]
    EmptyCountColumn,

    #[error("Invalid max report groups: 0 (use None to list every group)")]
    InvalidMaxReportGroups,
}

impl From<ConfigValidationError> for crate::error::DuplicateCheckError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::DuplicateCheckError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`CheckerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CheckerConfigBuilder {
    validation_policy: Option<ValidationPolicy>,
    count_column: Option<String>,
    project_first: Option<bool>,
    max_report_groups: Option<Option<usize>>,
}

impl CheckerConfigBuilder {
    /// Set the validation policy.
    pub fn validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.validation_policy = Some(policy);
        self
    }

    /// Set the name of the count column.
    pub fn count_column(mut self, name: impl Into<String>) -> Self {
        self.count_column = Some(name.into());
        self
    }

    /// Enable or disable projecting onto the key columns before grouping.
    ///
    /// Results are identical either way; projection only drops unused
    /// columns early.
    pub fn project_first(mut self, project: bool) -> Self {
        self.project_first = Some(project);
        self
    }

    /// Limit how many groups a report lists.
    pub fn max_report_groups(mut self, limit: Option<usize>) -> Self {
        self.max_report_groups = Some(limit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CheckerConfig` or an error if validation fails.
    pub fn build(self) -> Result<CheckerConfig, ConfigValidationError> {
        let config = CheckerConfig {
            validation_policy: self.validation_policy.unwrap_or_default(),
            count_column: self
                .count_column
                .unwrap_or_else(|| DEFAULT_COUNT_COLUMN.to_string()),
            project_first: self.project_first.unwrap_or(true),
            max_report_groups: self
                .max_report_groups
                .unwrap_or(Some(DEFAULT_MAX_REPORT_GROUPS)),
        };

        config.validate()?;
        Ok(config)
    }
}
