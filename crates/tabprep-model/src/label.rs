//! Column labels as they appear on input tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw column label: either a flat string or a multi-level label made of
/// hierarchical parts (e.g. a two-row CSV header).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnLabel {
    Flat(String),
    Multi(Vec<String>),
}

impl ColumnLabel {
    pub fn flat(label: impl Into<String>) -> Self {
        Self::Flat(label.into())
    }

    pub fn multi<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(parts.into_iter().map(Into::into).collect())
    }

    /// Join multi-level parts into a single flat string.
    ///
    /// Flat labels are returned unchanged; `joiner` only applies between the
    /// parts of a multi-level label.
    pub fn flatten(&self, joiner: &str) -> String {
        match self {
            Self::Flat(label) => label.clone(),
            Self::Multi(parts) => parts.join(joiner),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

/// The string coercion used for mapping keys: flat labels render verbatim,
/// multi-level labels render as a quoted tuple, e.g. `("sales", "2023")`.
impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(label) => f.write_str(label),
            Self::Multi(parts) => {
                f.write_str("(")?;
                for (idx, part) in parts.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{part}\"")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for ColumnLabel {
    fn from(label: &str) -> Self {
        Self::Flat(label.to_string())
    }
}

impl From<String> for ColumnLabel {
    fn from(label: String) -> Self {
        Self::Flat(label)
    }
}

impl From<Vec<String>> for ColumnLabel {
    fn from(parts: Vec<String>) -> Self {
        Self::Multi(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_joins_multi_parts() {
        let label = ColumnLabel::multi(["sales", "2023"]);
        assert_eq!(label.flatten("__"), "sales__2023");
    }

    #[test]
    fn flatten_leaves_flat_labels_alone() {
        let label = ColumnLabel::flat("Revenue");
        assert_eq!(label.flatten("__"), "Revenue");
    }

    #[test]
    fn display_coerces_multi_to_tuple_form() {
        let label = ColumnLabel::multi(["sales", "2023"]);
        assert_eq!(label.to_string(), "(\"sales\", \"2023\")");
    }
}
