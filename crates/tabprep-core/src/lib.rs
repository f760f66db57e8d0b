//! Tabular preprocessing core.
//!
//! Two independent, stateless passes over an in-memory table:
//!
//! - [`columns::clean_columns`] normalizes column labels into unique, safe
//!   snake_case identifiers and returns the old->new [`NameMapping`].
//! - [`profile::profile`] classifies each column's logical type and computes
//!   per-type descriptive statistics into a one-row-per-column frame.
//!
//! Neither pass mutates its input; both are total over any frame, including
//! zero-row and zero-column frames.
//!
//! ```no_run
//! use polars::prelude::*;
//! use tabprep_core::{clean_columns, profile};
//! use tabprep_model::{CleanOptions, ProfileOptions};
//!
//! # fn run(df: DataFrame) -> anyhow::Result<()> {
//! let (renamed, mapping) = clean_columns(&df, &CleanOptions::default())?;
//! let summary = profile(&renamed, &ProfileOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod data_utils;
pub mod profile;

pub use columns::{clean_columns, clean_columns_with_labels, clean_labels};
pub use profile::profile;

#[doc(inline)]
pub use tabprep_model as model;
