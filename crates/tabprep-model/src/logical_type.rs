//! Coarse semantic classification of column contents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The logical type of a column, distinct from its storage dtype.
///
/// Classification is a priority-ordered decision: numeric, then boolean,
/// then datetime, then cardinality-based categorical/text for string-like
/// columns, and `Other` for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    Numeric,
    Boolean,
    Datetime,
    Categorical,
    Text,
    Other,
}

impl LogicalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Categorical => "categorical",
            Self::Text => "text",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
