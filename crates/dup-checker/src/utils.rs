//! Shared utilities for duplicate checking.

use polars::prelude::*;
use serde_json::{Number, Value};

/// Convert a Polars `AnyValue` cell to a JSON value.
///
/// | Polars Type | JSON Type |
/// |-------------|-----------|
/// | Null        | null      |
/// | Boolean     | boolean   |
/// | Int8-64     | number    |
/// | UInt8-64    | number    |
/// | Float32/64  | number    |
/// | String      | string    |
/// | Other       | string    |
///
/// NaN and infinite floats become `null`; dates, lists and other nested
/// values are stringified with their `Display` form.
pub fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),

        AnyValue::Int8(i) => Value::Number(i.into()),
        AnyValue::Int16(i) => Value::Number(i.into()),
        AnyValue::Int32(i) => Value::Number(i.into()),
        AnyValue::Int64(i) => Value::Number(i.into()),

        AnyValue::UInt8(u) => Value::Number(u.into()),
        AnyValue::UInt16(u) => Value::Number(u.into()),
        AnyValue::UInt32(u) => Value::Number(u.into()),
        AnyValue::UInt64(u) => Value::Number(u.into()),

        AnyValue::Float32(f) => Number::from_f64(f as f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AnyValue::Float64(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),

        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),

        _ => Value::String(format!("{}", value)),
    }
}

/// Render a JSON cell value for plain-text output.
///
/// Strings are shown without quotes and null as `null`.
pub fn display_json_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truncate a string to at most `max_len` characters, marking the cut with `…`.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Percentage of `part` in `total`, 0.0 when `total` is zero.
#[inline]
pub fn percentage(part: u64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_value_to_json_scalars() {
        assert_eq!(any_value_to_json(AnyValue::Null), Value::Null);
        assert_eq!(any_value_to_json(AnyValue::Boolean(true)), Value::Bool(true));
        assert_eq!(any_value_to_json(AnyValue::Int64(-3)), serde_json::json!(-3));
        assert_eq!(any_value_to_json(AnyValue::UInt32(7)), serde_json::json!(7));
        assert_eq!(any_value_to_json(AnyValue::Float64(1.5)), serde_json::json!(1.5));
        assert_eq!(
            any_value_to_json(AnyValue::String("A")),
            Value::String("A".to_string())
        );
    }

    #[test]
    fn test_any_value_to_json_nan_is_null() {
        assert_eq!(any_value_to_json(AnyValue::Float64(f64::NAN)), Value::Null);
    }

    #[test]
    fn test_display_json_value() {
        assert_eq!(display_json_value(&Value::String("A".to_string())), "A");
        assert_eq!(display_json_value(&Value::Null), "null");
        assert_eq!(display_json_value(&serde_json::json!(4)), "4");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a_very_long_column", 6), "a_ver…");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(7, 7), 100.0);
        assert!((percentage(2, 7) - 28.571).abs() < 0.01);
    }
}
