//! Configuration for the cleaning and profiling passes.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Names a cleaned label must never equal; they collide with container-level
/// accessors.
pub const RESERVED_LABELS: [&str; 2] = ["index", "columns"];

/// Options for column label cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Requested renames (original label -> desired name), applied after the
    /// base pass in this order. Desired names still go through the sanitize
    /// pipeline and collision resolution. Overrides naming a label absent
    /// from the table are silently ignored.
    pub overrides: Vec<(String, String)>,

    /// When set, the old->new mapping is written to this path as JSON after
    /// cleaning.
    pub save_map_to: Option<PathBuf>,

    /// Prefix prepended when a sanitized label starts with a digit.
    pub digit_prefix: String,

    /// Suffix appended while a candidate collides with a reserved name.
    pub conflict_suffix: String,

    /// Flatten multi-level labels with `mi_joiner` before cleaning. When
    /// off, multi-level labels are string-coerced to their tuple form.
    pub flatten_multiindex: bool,

    /// Joiner between the parts of a flattened multi-level label.
    pub mi_joiner: String,

    /// Maximum length of a cleaned label; unlimited when `None`.
    pub max_len: Option<usize>,

    /// Names forbidden in addition to [`RESERVED_LABELS`].
    pub extra_reserved: Vec<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            overrides: Vec::new(),
            save_map_to: None,
            digit_prefix: "col_".to_string(),
            conflict_suffix: "_col".to_string(),
            flatten_multiindex: true,
            mi_joiner: "__".to_string(),
            max_len: None,
            extra_reserved: Vec::new(),
        }
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(
        mut self,
        original: impl Into<String>,
        desired: impl Into<String>,
    ) -> Self {
        self.overrides.push((original.into(), desired.into()));
        self
    }

    pub fn with_overrides(mut self, overrides: Vec<(String, String)>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_save_map_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_map_to = Some(path.into());
        self
    }

    pub fn with_digit_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.digit_prefix = prefix.into();
        self
    }

    pub fn with_conflict_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.conflict_suffix = suffix.into();
        self
    }

    pub fn with_flatten_multiindex(mut self, enable: bool) -> Self {
        self.flatten_multiindex = enable;
        self
    }

    pub fn with_mi_joiner(mut self, joiner: impl Into<String>) -> Self {
        self.mi_joiner = joiner.into();
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn with_reserved(mut self, name: impl Into<String>) -> Self {
        self.extra_reserved.push(name.into());
        self
    }

    /// The full reserved set: builtin names plus `extra_reserved`.
    pub fn reserved_set(&self) -> HashSet<String> {
        RESERVED_LABELS
            .iter()
            .map(|name| (*name).to_string())
            .chain(self.extra_reserved.iter().cloned())
            .collect()
    }
}

/// Options for column profiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOptions {
    /// How many most-frequent values to report for categorical columns.
    pub top_n: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

impl ProfileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = CleanOptions::default();
        assert_eq!(options.digit_prefix, "col_");
        assert_eq!(options.conflict_suffix, "_col");
        assert_eq!(options.mi_joiner, "__");
        assert!(options.flatten_multiindex);
        assert!(options.max_len.is_none());
        assert_eq!(ProfileOptions::default().top_n, 3);
    }

    #[test]
    fn reserved_set_includes_extras() {
        let options = CleanOptions::new().with_reserved("id");
        let reserved = options.reserved_set();
        assert!(reserved.contains("index"));
        assert!(reserved.contains("columns"));
        assert!(reserved.contains("id"));
    }
}
