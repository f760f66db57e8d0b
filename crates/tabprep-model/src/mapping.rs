//! The old-name to new-name record produced by a cleaning pass.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TabprepError};

/// One renamed column: the label as encountered on input and the cleaned
/// label that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub original: String,
    pub cleaned: String,
}

/// Ordered record of every rename performed by a cleaning pass.
///
/// Entries follow input column order. Original labels may repeat when the
/// input carried duplicate column names; cleaned labels are unique across
/// the whole mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping {
    entries: Vec<MappingEntry>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, original: impl Into<String>, cleaned: impl Into<String>) {
        self.entries.push(MappingEntry {
            original: original.into(),
            cleaned: cleaned.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    /// Cleaned labels in input column order.
    pub fn cleaned_labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.cleaned.as_str())
    }

    /// Cleaned name for an original label. With duplicate originals the
    /// first entry wins.
    pub fn cleaned(&self, original: &str) -> Option<&str> {
        self.position_of(original)
            .map(|idx| self.entries[idx].cleaned.as_str())
    }

    /// Index of the first entry whose original label matches.
    pub fn position_of(&self, original: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.original == original)
    }

    /// Replace the cleaned name of the entry at `index`.
    pub fn set_cleaned(&mut self, index: usize, cleaned: impl Into<String>) {
        self.entries[index].cleaned = cleaned.into();
    }

    /// Serialize to a pretty-printed JSON object, keys in entry order,
    /// non-ASCII preserved.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the mapping as JSON to `path`, creating parent directories as
    /// needed. Filesystem errors propagate unrecovered.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| TabprepError::MappingWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| TabprepError::MappingWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<'a> IntoIterator for &'a NameMapping {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, String)> for NameMapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (original, cleaned) in iter {
            mapping.push(original, cleaned);
        }
        mapping
    }
}

/// Serializes as a JSON object `{original: cleaned, ...}` in entry order.
/// Duplicate originals produce repeated keys; a naive reload keeps the last.
impl Serialize for NameMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.original, &entry.cleaned)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NameMapping {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = NameMapping;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of original labels to cleaned labels")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut mapping = NameMapping::new();
                while let Some((original, cleaned)) = access.next_entry::<String, String>()? {
                    mapping.push(original, cleaned);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_entry_order_in_json() {
        let mut mapping = NameMapping::new();
        mapping.push("Z Column", "z_column");
        mapping.push("A Column", "a_column");
        let json = mapping.to_json_pretty().unwrap();
        let z = json.find("Z Column").unwrap();
        let a = json.find("A Column").unwrap();
        assert!(z < a, "entry order must survive serialization");
    }

    #[test]
    fn keeps_non_ascii_unescaped() {
        let mut mapping = NameMapping::new();
        mapping.push("Café", "cafe");
        let json = mapping.to_json_pretty().unwrap();
        assert!(json.contains("Café"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn first_entry_wins_for_duplicate_originals() {
        let mut mapping = NameMapping::new();
        mapping.push("name", "name");
        mapping.push("name", "name_2");
        assert_eq!(mapping.cleaned("name"), Some("name"));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn round_trips_through_json() {
        let mut mapping = NameMapping::new();
        mapping.push("User ID", "user_id");
        mapping.push("Total", "total");
        let json = mapping.to_json_pretty().unwrap();
        let loaded: NameMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, mapping);
    }
}
