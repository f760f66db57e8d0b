//! CLI argument definitions for tabprep.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabprep",
    version,
    about = "Tabular data preprocessing - clean column names and profile columns",
    long_about = "Preprocess tabular data files.\n\n\
                  `clean` normalizes column names to unique, safe snake_case\n\
                  identifiers and can persist the old->new mapping as JSON.\n\
                  `profile` infers each column's logical type and reports\n\
                  per-column statistics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a CSV file's column names.
    Clean(CleanArgs),

    /// Profile a CSV file's columns.
    Profile(ProfileArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the input CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Write the renamed table to this path (prints the mapping otherwise).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the old->new mapping as JSON to this path.
    #[arg(long = "save-map", value_name = "PATH")]
    pub save_map: Option<PathBuf>,

    /// Rename a specific column (repeatable).
    #[arg(long = "override", value_name = "OLD=NEW")]
    pub overrides: Vec<String>,

    /// Maximum length of a cleaned name.
    #[arg(long = "max-len", value_name = "N")]
    pub max_len: Option<usize>,

    /// Prefix for names that would start with a digit.
    #[arg(long = "digit-prefix", value_name = "PREFIX", default_value = "col_")]
    pub digit_prefix: String,

    /// Suffix appended to names that collide with reserved names.
    #[arg(long = "conflict-suffix", value_name = "SUFFIX", default_value = "_col")]
    pub conflict_suffix: String,

    /// Joiner between the levels of a multi-level header.
    #[arg(long = "joiner", value_name = "JOINER", default_value = "__")]
    pub joiner: String,

    /// Keep multi-level headers as tuple-coerced strings instead of joining.
    #[arg(long = "no-flatten")]
    pub no_flatten: bool,

    /// Forbid an additional name (repeatable).
    #[arg(long = "reserve", value_name = "NAME")]
    pub reserve: Vec<String>,

    /// Number of header rows in the input (2 for multi-level headers).
    #[arg(long = "header-rows", value_name = "N", default_value_t = 1)]
    pub header_rows: usize,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Path to the input CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// How many top values to report for categorical columns.
    #[arg(long = "top-n", value_name = "N", default_value_t = 3)]
    pub top_n: usize,

    /// Write the profile as CSV to this path instead of printing a table.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of header rows in the input (2 for multi-level headers).
    #[arg(long = "header-rows", value_name = "N", default_value_t = 1)]
    pub header_rows: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
