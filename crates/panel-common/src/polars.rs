//! Polars AnyValue utility functions.
//!
//! Helpers for turning Polars `AnyValue` cells into linking values and
//! plain Rust scalars.

use panel_model::LinkValue;
use polars::prelude::{AnyValue, Column, PolarsResult};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use panel_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
///
/// Booleans map to 0 and 1; strings are not parsed.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Converts a cell into a [`LinkValue`].
///
/// Nulls and NaN become `Missing`, numeric and boolean cells become
/// `Number`, everything else is compared by its string form.
pub fn any_to_link_value(value: AnyValue<'_>) -> LinkValue {
    if matches!(value, AnyValue::Null) {
        return LinkValue::Missing;
    }
    match any_to_f64(&value) {
        Some(v) if v.is_nan() => LinkValue::Missing,
        Some(v) => LinkValue::Number(v),
        None => LinkValue::Text(any_to_string(value)),
    }
}

/// Reads every cell of a column as a [`LinkValue`], in row order.
pub fn column_link_values(column: &Column) -> PolarsResult<Vec<LinkValue>> {
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(any_to_link_value(column.get(idx)?));
    }
    Ok(values)
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(&AnyValue::Null), None);
        assert_eq!(any_to_f64(&AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(&AnyValue::Float64(3.5)), Some(3.5));
        assert_eq!(any_to_f64(&AnyValue::Boolean(true)), Some(1.0));
        assert_eq!(any_to_f64(&AnyValue::String("2.5")), None);
    }

    #[test]
    fn test_any_to_link_value() {
        assert_eq!(any_to_link_value(AnyValue::Null), LinkValue::Missing);
        assert_eq!(
            any_to_link_value(AnyValue::Float64(f64::NAN)),
            LinkValue::Missing
        );
        assert_eq!(
            any_to_link_value(AnyValue::Int64(7)),
            LinkValue::Number(7.0)
        );
        assert_eq!(
            any_to_link_value(AnyValue::String("high")),
            LinkValue::Text("high".to_string())
        );
    }

    #[test]
    fn test_column_link_values() {
        let column = Series::new("edu".into(), &[Some(3_i64), None, Some(1)]).into_column();
        let values = column_link_values(&column).expect("read column");
        assert_eq!(
            values,
            vec![
                LinkValue::Number(3.0),
                LinkValue::Missing,
                LinkValue::Number(1.0)
            ]
        );
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  0.25 "), Some(0.25));
        assert_eq!(parse_f64("invalid"), None);
    }
}
