//! Per-column statistical profiling.
//!
//! Builds a one-row-per-column summary frame: storage dtype, inferred
//! logical type, distinct/missing/duplicate counts, and type-specific
//! statistics (numeric range and mean, categorical top values, datetime
//! range). Output row order always equals input column order.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use polars::prelude::{AnyValue, Column, DataFrame, DataType, TimeUnit};
use tracing::info;

use tabprep_model::{LogicalType, ProfileOptions};

use crate::data_utils::{any_to_f64, any_to_string, round2};

/// Upper bound on distinct non-null values for a string column to classify
/// as categorical rather than free text.
const CATEGORICAL_MAX_UNIQUE: usize = 10;

/// Frequency table over rendered values, preserving first-encounter order
/// so frequency ties break deterministically. `None` is the null group.
#[derive(Default)]
struct ValueCounts {
    groups: Vec<(Option<String>, usize)>,
    index: HashMap<Option<String>, usize>,
}

impl ValueCounts {
    fn add(&mut self, key: Option<String>) {
        match self.index.get(&key) {
            Some(&position) => self.groups[position].1 += 1,
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, 1));
            }
        }
    }

    fn null_count(&self) -> usize {
        self.index
            .get(&None)
            .map_or(0, |&position| self.groups[position].1)
    }

    fn distinct_non_null(&self) -> usize {
        self.groups
            .iter()
            .filter(|(key, _)| key.is_some())
            .count()
    }

    /// Every occurrence of a value that appears more than once, nulls
    /// included as a value group.
    fn duplicate_occurrences(&self) -> usize {
        self.groups
            .iter()
            .filter(|(_, count)| *count > 1)
            .map(|(_, count)| *count)
            .sum()
    }

    /// The `n` most frequent groups, descending by count; ties keep
    /// first-encounter order (stable sort).
    fn top(&self, n: usize) -> Vec<(&Option<String>, usize)> {
        let mut ordered: Vec<(&Option<String>, usize)> = self
            .groups
            .iter()
            .map(|(key, count)| (key, *count))
            .collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        ordered.truncate(n);
        ordered
    }
}

struct ColumnStats {
    name: String,
    dtype: String,
    logical_type: LogicalType,
    nunique: u32,
    missing: u32,
    missing_pct: f64,
    duplicates: u32,
    duplicates_pct: f64,
    min: Option<f64>,
    max: Option<f64>,
    mean: Option<f64>,
    top_values: Option<String>,
    min_date: Option<String>,
    max_date: Option<String>,
}

/// Ordered decision chain for the logical type. Each predicate is checked
/// at most once; the first match wins.
fn classify(dtype: &DataType, distinct_non_null: usize) -> LogicalType {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => LogicalType::Numeric,
        DataType::Boolean => LogicalType::Boolean,
        DataType::Date | DataType::Datetime(_, _) => LogicalType::Datetime,
        DataType::String => {
            if distinct_non_null <= CATEGORICAL_MAX_UNIQUE {
                LogicalType::Categorical
            } else {
                LogicalType::Text
            }
        }
        _ => LogicalType::Other,
    }
}

/// Percentage of `part` in `total` rows, 2 decimals; defined as 0 for an
/// empty column rather than NaN.
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(part as f64 / total as f64 * 100.0)
    }
}

fn numeric_stats(column: &Column) -> (Option<f64>, Option<f64>, Option<f64>) {
    let series = column.as_materialized_series();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;
    for idx in 0..series.len() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        if let Some(number) = any_to_f64(value) {
            min = min.min(number);
            max = max.max(number);
            sum += number;
            count += 1;
        }
    }
    if count == 0 {
        (None, None, None)
    } else {
        (Some(min), Some(max), Some(round2(sum / count as f64)))
    }
}

/// 1970-01-01 in days of the proleptic Gregorian calendar.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn render_date(days: i64) -> Option<String> {
    let from_ce = i32::try_from(days).ok()?.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?;
    NaiveDate::from_num_days_from_ce_opt(from_ce).map(|date| date.to_string())
}

fn render_timestamp(timestamp: i64, unit: TimeUnit) -> Option<String> {
    let (secs, nanos) = match unit {
        TimeUnit::Nanoseconds => (
            timestamp.div_euclid(1_000_000_000),
            timestamp.rem_euclid(1_000_000_000),
        ),
        TimeUnit::Microseconds => (
            timestamp.div_euclid(1_000_000),
            timestamp.rem_euclid(1_000_000) * 1_000,
        ),
        TimeUnit::Milliseconds => (
            timestamp.div_euclid(1_000),
            timestamp.rem_euclid(1_000) * 1_000_000,
        ),
    };
    DateTime::from_timestamp(secs, nanos as u32).map(|at| at.naive_utc().to_string())
}

/// Earliest and latest non-null timestamp of a Date or Datetime column,
/// rendered as text. Works on the underlying integer representation.
fn datetime_range(column: &Column) -> Result<(Option<String>, Option<String>)> {
    let series = column.as_materialized_series();
    let dtype = series.dtype().clone();
    let physical = series.cast(&DataType::Int64)?;
    let values = physical.i64()?;

    let mut min: Option<i64> = None;
    let mut max: Option<i64> = None;
    for idx in 0..values.len() {
        if let Some(value) = values.get(idx) {
            min = Some(min.map_or(value, |current| current.min(value)));
            max = Some(max.map_or(value, |current| current.max(value)));
        }
    }

    let render = |raw: Option<i64>| -> Option<String> {
        let raw = raw?;
        match dtype {
            DataType::Date => render_date(raw),
            DataType::Datetime(unit, _) => render_timestamp(raw, unit),
            _ => None,
        }
    };
    Ok((render(min), render(max)))
}

fn column_stats(column: &Column, n_rows: usize, top_n: usize) -> Result<ColumnStats> {
    let series = column.as_materialized_series();

    let mut counts = ValueCounts::default();
    for idx in 0..series.len() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        let key = match value {
            AnyValue::Null => None,
            value => Some(any_to_string(value)),
        };
        counts.add(key);
    }

    let missing = counts.null_count();
    let distinct_non_null = counts.distinct_non_null();
    // Null counts as one extra distinct value here, while the categorical
    // cardinality test below ignores it. The asymmetry is intentional.
    let nunique = distinct_non_null + usize::from(missing > 0);
    let duplicates = counts.duplicate_occurrences();

    let logical_type = classify(series.dtype(), distinct_non_null);

    let (min, max, mean) = if logical_type == LogicalType::Numeric {
        numeric_stats(column)
    } else {
        (None, None, None)
    };

    let top_values = if logical_type == LogicalType::Categorical && n_rows > 0 {
        let rendered: Vec<String> = counts
            .top(top_n)
            .into_iter()
            .map(|(key, count)| {
                let shown = key.as_deref().unwrap_or("null");
                format!("{shown}: {count}")
            })
            .collect();
        Some(rendered.join(", "))
    } else {
        None
    };

    let (min_date, max_date) = if logical_type == LogicalType::Datetime {
        datetime_range(column)?
    } else {
        (None, None)
    };

    Ok(ColumnStats {
        name: column.name().to_string(),
        dtype: series.dtype().to_string(),
        logical_type,
        nunique: nunique as u32,
        missing: missing as u32,
        missing_pct: percentage(missing, n_rows),
        duplicates: duplicates as u32,
        duplicates_pct: percentage(duplicates, n_rows),
        min,
        max,
        mean,
        top_values,
        min_date,
        max_date,
    })
}

/// Profile every column of a frame into a one-row-per-column summary.
///
/// The output carries, in fixed order: `column`, `dtype`, `logical_type`,
/// `nunique`, `missing`, `missing_pct`, `duplicates`, `duplicates_pct`,
/// `min`, `max`, `mean`, `top_values`, `min_date`, `max_date`. Row order
/// matches input column order. Total over any frame; percentages are 0 (not
/// NaN) for a zero-row frame.
pub fn profile(df: &DataFrame, options: &ProfileOptions) -> Result<DataFrame> {
    let n_rows = df.height();
    let mut stats: Vec<ColumnStats> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        stats.push(column_stats(column, n_rows, options.top_n)?);
    }

    let summary = DataFrame::new(vec![
        Column::new(
            "column".into(),
            stats.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "dtype".into(),
            stats.iter().map(|s| s.dtype.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "logical_type".into(),
            stats
                .iter()
                .map(|s| s.logical_type.as_str().to_string())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "nunique".into(),
            stats.iter().map(|s| s.nunique).collect::<Vec<_>>(),
        ),
        Column::new(
            "missing".into(),
            stats.iter().map(|s| s.missing).collect::<Vec<_>>(),
        ),
        Column::new(
            "missing_pct".into(),
            stats.iter().map(|s| s.missing_pct).collect::<Vec<_>>(),
        ),
        Column::new(
            "duplicates".into(),
            stats.iter().map(|s| s.duplicates).collect::<Vec<_>>(),
        ),
        Column::new(
            "duplicates_pct".into(),
            stats.iter().map(|s| s.duplicates_pct).collect::<Vec<_>>(),
        ),
        Column::new("min".into(), stats.iter().map(|s| s.min).collect::<Vec<_>>()),
        Column::new("max".into(), stats.iter().map(|s| s.max).collect::<Vec<_>>()),
        Column::new(
            "mean".into(),
            stats.iter().map(|s| s.mean).collect::<Vec<_>>(),
        ),
        Column::new(
            "top_values".into(),
            stats
                .iter()
                .map(|s| s.top_values.clone())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "min_date".into(),
            stats.iter().map(|s| s.min_date.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "max_date".into(),
            stats.iter().map(|s| s.max_date.clone()).collect::<Vec<_>>(),
        ),
    ])?;

    info!(columns = df.width(), rows = n_rows, "profiled frame");
    Ok(summary)
}
