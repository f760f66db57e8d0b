//! CSV ingestion for tabprep.
//!
//! Loads CSV files into polars frames while keeping the raw header labels
//! around for cleaning. A file can carry one header row (flat labels) or
//! two (multi-level labels, upper level first).

pub mod csv;
pub mod error;

pub use csv::{read_csv_schema, read_csv_table};
pub use error::{IngestError, Result};
