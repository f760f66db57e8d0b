//! Subcommand implementations.

use std::fs::File;

use anyhow::{Context, Result, bail};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use tabprep_core::{clean_columns_with_labels, profile};
use tabprep_ingest::read_csv_table;
use tabprep_model::{CleanOptions, NameMapping, ProfileOptions};

use crate::cli::{CleanArgs, ProfileArgs};

/// Result of a `clean` run: the renamed frame and its mapping.
pub struct CleanOutcome {
    pub frame: DataFrame,
    pub mapping: NameMapping,
}

/// Parse one `--override OLD=NEW` argument.
pub fn parse_override(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((old, new)) if !old.is_empty() && !new.is_empty() => {
            Ok((old.to_string(), new.to_string()))
        }
        _ => bail!("invalid override '{raw}', expected OLD=NEW"),
    }
}

fn clean_options(args: &CleanArgs) -> Result<CleanOptions> {
    let mut options = CleanOptions::new()
        .with_digit_prefix(args.digit_prefix.clone())
        .with_conflict_suffix(args.conflict_suffix.clone())
        .with_mi_joiner(args.joiner.clone())
        .with_flatten_multiindex(!args.no_flatten);
    for raw in &args.overrides {
        let (old, new) = parse_override(raw)?;
        options = options.with_override(old, new);
    }
    if let Some(max_len) = args.max_len {
        options = options.with_max_len(max_len);
    }
    for name in &args.reserve {
        options = options.with_reserved(name.clone());
    }
    if let Some(path) = &args.save_map {
        options = options.with_save_map_to(path.clone());
    }
    Ok(options)
}

fn write_csv(df: &mut DataFrame, path: &std::path::Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Run the `clean` subcommand.
pub fn run_clean(args: &CleanArgs) -> Result<CleanOutcome> {
    let options = clean_options(args)?;
    let (df, labels) = read_csv_table(&args.input, args.header_rows)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let (mut frame, mapping) = clean_columns_with_labels(&df, &labels, &options)?;

    if let Some(path) = &args.output {
        write_csv(&mut frame, path)?;
        info!(path = %path.display(), "wrote cleaned table");
    }

    Ok(CleanOutcome { frame, mapping })
}

/// Run the `profile` subcommand.
pub fn run_profile(args: &ProfileArgs) -> Result<DataFrame> {
    let (df, _labels) = read_csv_table(&args.input, args.header_rows)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let options = ProfileOptions::new().with_top_n(args.top_n);
    let mut summary = profile(&df, &options)?;

    if let Some(path) = &args.output {
        write_csv(&mut summary, path)?;
        info!(path = %path.display(), "wrote profile");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_overrides() {
        let (old, new) = parse_override("Name=full_name").unwrap();
        assert_eq!(old, "Name");
        assert_eq!(new, "full_name");
    }

    #[test]
    fn rejects_malformed_overrides() {
        assert!(parse_override("Name").is_err());
        assert!(parse_override("=x").is_err());
        assert!(parse_override("x=").is_err());
    }
}
