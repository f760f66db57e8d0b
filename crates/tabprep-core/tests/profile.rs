//! Tests for per-column profiling.

use polars::prelude::*;
use tabprep_core::profile;
use tabprep_model::ProfileOptions;

fn row_value(summary: &DataFrame, column: &str, row: usize) -> String {
    let value = summary
        .column(column)
        .unwrap()
        .as_materialized_series()
        .get(row)
        .unwrap();
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(v) => v.to_string(),
        AnyValue::StringOwned(v) => v.to_string(),
        other => other.to_string(),
    }
}

fn f64_at(summary: &DataFrame, column: &str, row: usize) -> Option<f64> {
    summary
        .column(column)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .get(row)
}

fn u32_at(summary: &DataFrame, column: &str, row: usize) -> u32 {
    summary
        .column(column)
        .unwrap()
        .as_materialized_series()
        .u32()
        .unwrap()
        .get(row)
        .unwrap()
}

#[test]
fn numeric_column_with_nulls_matches_expected_statistics() {
    let df = df! {
        "values" => &[Some(1.0f64), Some(1.0), Some(2.0), None, Some(3.0)],
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(summary.height(), 1);
    // null counts as one extra distinct value
    assert_eq!(u32_at(&summary, "nunique", 0), 4);
    assert_eq!(u32_at(&summary, "missing", 0), 1);
    assert_eq!(f64_at(&summary, "missing_pct", 0), Some(20.0));
    // both occurrences of the repeated value count
    assert_eq!(u32_at(&summary, "duplicates", 0), 2);
    assert_eq!(f64_at(&summary, "duplicates_pct", 0), Some(40.0));
    assert_eq!(row_value(&summary, "logical_type", 0), "numeric");
    assert_eq!(f64_at(&summary, "min", 0), Some(1.0));
    assert_eq!(f64_at(&summary, "max", 0), Some(3.0));
    assert_eq!(f64_at(&summary, "mean", 0), Some(1.75));
    assert_eq!(row_value(&summary, "top_values", 0), "");
}

#[test]
fn all_null_column_reports_full_missingness() {
    let df = df! {
        "empty" => &[None::<f64>, None, None, None],
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(f64_at(&summary, "missing_pct", 0), Some(100.0));
    assert_eq!(u32_at(&summary, "nunique", 0), 1);
    assert_eq!(row_value(&summary, "logical_type", 0), "numeric");
    assert_eq!(f64_at(&summary, "min", 0), None);
    assert_eq!(f64_at(&summary, "max", 0), None);
    assert_eq!(f64_at(&summary, "mean", 0), None);
    assert_eq!(row_value(&summary, "min_date", 0), "");
}

#[test]
fn categorical_top_values_count_nulls_and_break_ties_by_encounter_order() {
    let df = df! {
        "color" => &[Some("red"), Some("blue"), Some("red"), None],
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::new().with_top_n(2)).unwrap();

    assert_eq!(row_value(&summary, "logical_type", 0), "categorical");
    // blue was seen before the null, so it wins the tie
    assert_eq!(row_value(&summary, "top_values", 0), "red: 2, blue: 1");
}

#[test]
fn null_shows_up_in_top_values_when_frequent_enough() {
    let df = df! {
        "status" => &[None::<&str>, None, Some("ok")],
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::new().with_top_n(2)).unwrap();
    assert_eq!(row_value(&summary, "top_values", 0), "null: 2, ok: 1");
}

#[test]
fn high_cardinality_strings_classify_as_text() {
    let values: Vec<String> = (0..12).map(|n| format!("value-{n}")).collect();
    let df = DataFrame::new(vec![Column::new("notes".into(), values)]).unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(row_value(&summary, "logical_type", 0), "text");
    assert_eq!(row_value(&summary, "top_values", 0), "");
}

#[test]
fn boolean_columns_classify_as_boolean() {
    let df = df! {
        "flag" => &[true, false, true],
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(row_value(&summary, "logical_type", 0), "boolean");
    assert_eq!(f64_at(&summary, "min", 0), None);
}

#[test]
fn date_columns_report_their_range() {
    let dates = Series::new("when".into(), vec![Some(0i32), Some(19_000), None])
        .cast(&DataType::Date)
        .unwrap();
    let df = DataFrame::new(vec![dates.into()]).unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(row_value(&summary, "logical_type", 0), "datetime");
    assert_eq!(row_value(&summary, "min_date", 0), "1970-01-01");
    assert_eq!(row_value(&summary, "max_date", 0), "2022-01-08");
    assert_eq!(row_value(&summary, "top_values", 0), "");
}

#[test]
fn datetime_columns_report_timestamps() {
    let stamps = Series::new("at".into(), &[0i64, 86_400_000_000])
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .unwrap();
    let df = DataFrame::new(vec![stamps.into()]).unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(row_value(&summary, "min_date", 0), "1970-01-01 00:00:00");
    assert_eq!(row_value(&summary, "max_date", 0), "1970-01-02 00:00:00");
}

#[test]
fn zero_row_frame_yields_defined_percentages() {
    let df = df! {
        "a" => &Vec::<i64>::new(),
        "b" => &Vec::<String>::new(),
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(summary.height(), 2);
    for row in 0..2 {
        assert_eq!(f64_at(&summary, "missing_pct", row), Some(0.0));
        assert_eq!(f64_at(&summary, "duplicates_pct", row), Some(0.0));
    }
}

#[test]
fn zero_column_frame_yields_empty_summary() {
    let df = DataFrame::default();
    let summary = profile(&df, &ProfileOptions::default()).unwrap();
    assert_eq!(summary.height(), 0);
    assert!(summary.width() > 0);
}

#[test]
fn row_order_matches_input_column_order() {
    let df = df! {
        "zeta" => &[1i64],
        "alpha" => &["x"],
        "mid" => &[true],
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    let names: Vec<String> = (0..3).map(|row| row_value(&summary, "column", row)).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn summary_columns_follow_the_documented_order() {
    let df = df! { "a" => &[1i64] }.unwrap();
    let summary = profile(&df, &ProfileOptions::default()).unwrap();
    let names: Vec<&str> = summary
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "column",
            "dtype",
            "logical_type",
            "nunique",
            "missing",
            "missing_pct",
            "duplicates",
            "duplicates_pct",
            "min",
            "max",
            "mean",
            "top_values",
            "min_date",
            "max_date",
        ]
    );
}

#[test]
fn integer_dtype_is_numeric_with_raw_min_max() {
    let df = df! {
        "n" => &[10i64, -5, 10],
    }
    .unwrap();

    let summary = profile(&df, &ProfileOptions::default()).unwrap();

    assert_eq!(row_value(&summary, "logical_type", 0), "numeric");
    assert_eq!(f64_at(&summary, "min", 0), Some(-5.0));
    assert_eq!(f64_at(&summary, "max", 0), Some(10.0));
    assert_eq!(f64_at(&summary, "mean", 0), Some(5.0));
    assert_eq!(u32_at(&summary, "duplicates", 0), 2);
}
