//! Value-level helpers shared by the cleaning and profiling passes.

use polars::prelude::AnyValue;

/// Render an `AnyValue` for display. Nulls render as the empty string;
/// integer-valued floats drop the trailing `.0` so counts and codes read
/// naturally in frequency tables.
pub fn any_to_string(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(value) => value.to_string(),
        AnyValue::StringOwned(value) => value.to_string(),
        AnyValue::Float64(value) => format_numeric(value),
        AnyValue::Float32(value) => format_numeric(f64::from(value)),
        AnyValue::Boolean(value) => value.to_string(),
        value => value.to_string(),
    }
}

/// Format a float without a trailing `.0`.
pub fn format_numeric(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Numeric view of an `AnyValue`. `None` for nulls and non-numeric values;
/// callers gate on the column dtype, so strings are not parsed here.
pub fn any_to_f64(value: AnyValue) -> Option<f64> {
    match value {
        AnyValue::Float32(value) => Some(f64::from(value)),
        AnyValue::Float64(value) => Some(value),
        AnyValue::Int8(value) => Some(f64::from(value)),
        AnyValue::Int16(value) => Some(f64::from(value)),
        AnyValue::Int32(value) => Some(f64::from(value)),
        AnyValue::Int64(value) => Some(value as f64),
        AnyValue::UInt8(value) => Some(f64::from(value)),
        AnyValue::UInt16(value) => Some(f64::from(value)),
        AnyValue::UInt32(value) => Some(f64::from(value)),
        AnyValue::UInt64(value) => Some(value as f64),
        _ => None,
    }
}

/// Round to two decimal places, the precision used for means and
/// percentages in profile output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_renders_empty() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn integer_valued_floats_drop_fraction() {
        assert_eq!(any_to_string(AnyValue::Float64(3.0)), "3");
        assert_eq!(any_to_string(AnyValue::Float64(3.5)), "3.5");
    }

    #[test]
    fn any_to_f64_covers_integer_widths() {
        assert_eq!(any_to_f64(AnyValue::Int8(-3)), Some(-3.0));
        assert_eq!(any_to_f64(AnyValue::UInt64(7)), Some(7.0));
        assert_eq!(any_to_f64(AnyValue::String("7")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }

    #[test]
    fn round2_rounds_half_up_at_two_places() {
        assert_eq!(round2(1.754), 1.75);
        assert_eq!(round2(1.755), 1.76);
        assert_eq!(round2(40.0), 40.0);
    }
}
