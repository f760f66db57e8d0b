//! CSV reading with explicit header configuration.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use tabprep_model::ColumnLabel;

use crate::error::{IngestError, Result};

/// Read up to `count` raw lines from the start of the file, stripping a BOM
/// from the first line if present.
fn read_first_lines(path: &Path, count: usize) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut lines = Vec::with_capacity(count);
    for line in reader.lines().take(count) {
        let line = line.map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cleaned = line.strip_prefix('\u{feff}').unwrap_or(&line).to_string();
        lines.push(cleaned);
    }
    Ok(lines)
}

/// Split one CSV line into fields, honoring double-quoted fields with
/// doubled-quote escapes.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            ch => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

/// Read the raw column labels of a CSV file.
///
/// - `header_rows = 1`: one header row, flat labels.
/// - `header_rows = 2`: two header rows; each column gets a two-level label
///   with the first row as the upper level.
pub fn read_csv_schema(path: &Path, header_rows: usize) -> Result<Vec<ColumnLabel>> {
    let lines = read_first_lines(path, header_rows.max(1))?;
    if lines.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let first = parse_csv_line(&lines[0]);
    if first.is_empty() || first.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let labels = match header_rows {
        2 if lines.len() >= 2 => {
            let second = parse_csv_line(&lines[1]);
            first
                .into_iter()
                .zip(second)
                .map(|(upper, lower)| ColumnLabel::multi([upper, lower]))
                .collect()
        }
        _ => first.into_iter().map(ColumnLabel::flat).collect(),
    };
    Ok(labels)
}

/// Read a CSV file into a polars frame together with its raw labels.
///
/// With two header rows the frame's column names come from the second row
/// while the returned labels carry both levels.
pub fn read_csv_table(path: &Path, header_rows: usize) -> Result<(DataFrame, Vec<ColumnLabel>)> {
    let labels = read_csv_schema(path, header_rows)?;

    // rows before the one polars treats as the header
    let skip_rows = header_rows.saturating_sub(1);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(skip_rows)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if labels.len() != df.width() {
        return Err(IngestError::HeaderMismatch {
            path: path.to_path_buf(),
            labels: labels.len(),
            columns: df.width(),
        });
    }

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );
    Ok((df, labels))
}
