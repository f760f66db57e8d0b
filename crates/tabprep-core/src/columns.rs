//! Column label cleaning.
//!
//! Normalizes arbitrary column labels to ASCII snake_case, splits
//! CamelCase (acronym-aware), avoids reserved names, and guarantees
//! uniqueness across the table. The label-level entry point
//! [`clean_labels`] is pure; [`clean_columns`] applies the result to a
//! polars frame and handles the optional mapping persistence.

use std::collections::HashSet;

use anyhow::Result;
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use tabprep_model::{CleanOptions, ColumnLabel, NameMapping, TabprepError};

/// Decompose to NFKD and drop combining marks, so "café" becomes "cafe".
fn deaccent(label: &str) -> String {
    label
        .nfkd()
        .filter(|ch| canonical_combining_class(*ch) == 0)
        .collect()
}

/// Insert `_` at case boundaries: after a lowercase letter or digit before
/// an uppercase letter, and before the last uppercase of an acronym run
/// that is followed by a lowercase letter ("HTTPServer" -> "HTTP_Server").
fn split_case_boundaries(label: &str) -> String {
    let chars: Vec<char> = label.chars().collect();
    let mut out = String::with_capacity(label.len() + 4);
    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && idx > 0 {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|next| next.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(ch);
    }
    out
}

/// The full sanitize pipeline for a single raw label: deaccent, case-split,
/// replace separators, lowercase, strip to `[a-z0-9_]`, collapse and trim
/// underscores, fall back to "col" when empty, and prefix a leading digit.
fn to_snake(raw: &str, digit_prefix: &str) -> String {
    let split = split_case_boundaries(deaccent(raw).trim());

    let mut lowered = String::with_capacity(split.len());
    for ch in split.chars() {
        if ch == '-' || ch == '/' || ch.is_whitespace() {
            lowered.push('_');
        } else {
            for low in ch.to_lowercase() {
                lowered.push(low);
            }
        }
    }

    let mut cleaned = String::with_capacity(lowered.len());
    let mut prev_underscore = false;
    for ch in lowered.chars() {
        if ch == '_' {
            if !prev_underscore {
                cleaned.push('_');
                prev_underscore = true;
            }
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            cleaned.push(ch);
            prev_underscore = false;
        }
        // anything else is outside the allowed alphabet and is dropped
    }

    let mut name = cleaned.trim_matches('_').to_string();
    if name.is_empty() {
        name = "col".to_string();
    }
    if name.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
        name = format!("{digit_prefix}{name}");
    }
    name
}

/// Truncate to `max_len` from the right, keeping room for a pending
/// disambiguation suffix so `name + suffix` still fits the cap, but never
/// going below one character.
fn shorten(name: &str, max_len: Option<usize>, keep_for_suffix: usize) -> String {
    match max_len {
        Some(limit) if name.chars().count() + keep_for_suffix > limit => {
            let cut = limit.saturating_sub(keep_for_suffix).max(1);
            name.chars().take(cut).collect()
        }
        _ => name.to_string(),
    }
}

/// Append the conflict suffix until the candidate leaves the reserved set.
/// Each pass strictly lengthens the candidate, so the loop terminates
/// within `reserved.len()` iterations for any non-empty suffix.
fn resolve_reserved(
    candidate: String,
    reserved: &HashSet<String>,
    conflict_suffix: &str,
) -> String {
    let mut name = candidate;
    while reserved.contains(&name) && !conflict_suffix.is_empty() {
        name = format!("{name}{conflict_suffix}");
    }
    name
}

/// Find the first available candidate in the deterministic suffix sequence
/// `_2`, `_3`, ... `own` is the column's current name during override
/// resolution; it never counts as taken. Terminates because every suffix
/// yields a distinct candidate and the used-set is finite.
fn resolve_unique(
    candidate: &str,
    used: &HashSet<String>,
    own: Option<&str>,
    max_len: Option<usize>,
) -> String {
    let taken = |name: &str| used.contains(name) && own != Some(name);
    if !taken(candidate) {
        return candidate.to_string();
    }
    let mut counter = 2usize;
    loop {
        let suffix = format!("_{counter}");
        let name = format!(
            "{}{suffix}",
            shorten(candidate, max_len, suffix.chars().count())
        );
        if !taken(&name) {
            return name;
        }
        counter += 1;
    }
}

/// Clean a sequence of raw labels into unique, safe snake_case names.
///
/// Pure: consumes labels, returns the ordered old->new [`NameMapping`] with
/// exactly one entry per input label (duplicates included). Overrides from
/// `options` are applied after the base pass, in their argument order;
/// overrides naming an absent label are silently ignored.
pub fn clean_labels(labels: &[ColumnLabel], options: &CleanOptions) -> NameMapping {
    let reserved = options.reserved_set();
    let mut mapping = NameMapping::new();
    let mut used: HashSet<String> = HashSet::new();

    for label in labels {
        let original = label.to_string();
        let raw = if options.flatten_multiindex {
            label.flatten(&options.mi_joiner)
        } else {
            original.clone()
        };
        let snake = to_snake(&raw, &options.digit_prefix);
        let unreserved = resolve_reserved(snake, &reserved, &options.conflict_suffix);
        let capped = shorten(&unreserved, options.max_len, 0);
        let cleaned = resolve_unique(&capped, &used, None, options.max_len);
        debug!(original = %original, cleaned = %cleaned, "cleaned column label");
        used.insert(cleaned.clone());
        mapping.push(original, cleaned);
    }

    for (original, desired) in &options.overrides {
        let Some(index) = mapping.position_of(original) else {
            debug!(original = %original, "override target not present, ignoring");
            continue;
        };
        let current = mapping.entries()[index].cleaned.clone();
        let snake = to_snake(desired, &options.digit_prefix);
        let unreserved = resolve_reserved(snake, &reserved, &options.conflict_suffix);
        let capped = shorten(&unreserved, options.max_len, 0);
        let cleaned = resolve_unique(&capped, &used, Some(current.as_str()), options.max_len);
        debug!(original = %original, from = %current, to = %cleaned, "applied override");
        // The old name stays in the used-set: no later override may claim it.
        used.insert(cleaned.clone());
        mapping.set_cleaned(index, cleaned);
    }

    mapping
}

/// Clean a frame's column labels and return the relabeled frame plus the
/// mapping. The input frame is not mutated. When `options.save_map_to` is
/// set, the mapping is also written as JSON; write failures propagate.
pub fn clean_columns(df: &DataFrame, options: &CleanOptions) -> Result<(DataFrame, NameMapping)> {
    let labels: Vec<ColumnLabel> = df
        .get_columns()
        .iter()
        .map(|column| ColumnLabel::flat(column.name().as_str()))
        .collect();
    clean_columns_with_labels(df, &labels, options)
}

/// Like [`clean_columns`] but with externally supplied labels, so callers
/// holding multi-level headers (e.g. a two-row CSV header) can clean against
/// the full label while the frame carries flat names.
pub fn clean_columns_with_labels(
    df: &DataFrame,
    labels: &[ColumnLabel],
    options: &CleanOptions,
) -> Result<(DataFrame, NameMapping)> {
    if labels.len() != df.width() {
        return Err(TabprepError::LabelCountMismatch {
            labels: labels.len(),
            columns: df.width(),
        }
        .into());
    }

    let mapping = clean_labels(labels, options);

    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for (column, entry) in df.get_columns().iter().zip(mapping.entries()) {
        let mut series = column.as_materialized_series().clone();
        series.rename(entry.cleaned.as_str().into());
        columns.push(series.into());
    }
    let renamed = DataFrame::new(columns)?;

    info!(columns = mapping.len(), "cleaned column labels");

    if let Some(path) = &options.save_map_to {
        mapping.save_to(path)?;
        info!(path = %path.display(), "saved name mapping");
    }

    Ok((renamed, mapping))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deaccent_strips_combining_marks() {
        assert_eq!(deaccent("Café"), "Cafe");
        assert_eq!(deaccent("naïve Zürich"), "naive Zurich");
    }

    #[test]
    fn case_split_handles_acronym_runs() {
        assert_eq!(split_case_boundaries("UserID"), "User_ID");
        assert_eq!(split_case_boundaries("HTTPServer"), "HTTP_Server");
        assert_eq!(split_case_boundaries("parseJSONFast"), "parse_JSON_Fast");
    }

    #[test]
    fn to_snake_sanitizes_separators_and_symbols() {
        assert_eq!(to_snake("Total Sales (USD)", "col_"), "total_sales_usd");
        assert_eq!(to_snake("a-b/c  d", "col_"), "a_b_c_d");
        assert_eq!(to_snake("__x__", "col_"), "x");
    }

    #[test]
    fn to_snake_falls_back_and_prefixes_digits() {
        assert_eq!(to_snake("???", "col_"), "col");
        assert_eq!(to_snake("2nd Name", "col_"), "col_2nd_name");
    }

    #[test]
    fn shorten_reserves_suffix_room() {
        assert_eq!(shorten("abcdefgh", Some(6), 0), "abcdef");
        assert_eq!(shorten("abcdefgh", Some(6), 2), "abcd");
        assert_eq!(shorten("abc", Some(6), 0), "abc");
        // a name at the cap still shrinks when a suffix is pending
        assert_eq!(shorten("abcdef", Some(6), 2), "abcd");
        // never below one character, even for absurd configurations
        assert_eq!(shorten("abcdefgh", Some(2), 5), "a");
    }

    #[test]
    fn resolve_unique_finds_first_free_suffix() {
        let used: HashSet<String> =
            ["name".to_string(), "name_2".to_string()].into_iter().collect();
        assert_eq!(resolve_unique("name", &used, None, None), "name_3");
    }

    #[test]
    fn resolve_unique_ignores_own_name() {
        let used: HashSet<String> = ["name".to_string()].into_iter().collect();
        assert_eq!(resolve_unique("name", &used, Some("name"), None), "name");
    }
}
