//! Tests for the shared model types.

use tabprep_model::{CleanOptions, ColumnLabel, NameMapping};

#[test]
fn save_to_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maps").join("deep").join("mapping.json");

    let mut mapping = NameMapping::new();
    mapping.push("Name", "name");
    mapping.save_to(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let loaded: NameMapping = serde_json::from_str(&written).unwrap();
    assert_eq!(loaded, mapping);
}

#[test]
fn save_to_propagates_filesystem_errors() {
    let dir = tempfile::tempdir().unwrap();
    // a file where a directory is needed
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("mapping.json");

    let mut mapping = NameMapping::new();
    mapping.push("Name", "name");
    assert!(mapping.save_to(&path).is_err());
}

#[test]
fn labels_round_trip_through_serde() {
    let flat = ColumnLabel::flat("Revenue");
    let multi = ColumnLabel::multi(["sales", "2023"]);

    let flat_json = serde_json::to_string(&flat).unwrap();
    let multi_json = serde_json::to_string(&multi).unwrap();
    assert_eq!(flat_json, "\"Revenue\"");
    assert_eq!(multi_json, "[\"sales\",\"2023\"]");

    assert_eq!(serde_json::from_str::<ColumnLabel>(&flat_json).unwrap(), flat);
    assert_eq!(
        serde_json::from_str::<ColumnLabel>(&multi_json).unwrap(),
        multi
    );
}

#[test]
fn clean_options_builders_compose() {
    let options = CleanOptions::new()
        .with_override("A", "b")
        .with_max_len(12)
        .with_reserved("total")
        .with_mi_joiner("::")
        .with_flatten_multiindex(false);

    assert_eq!(options.overrides, vec![("A".to_string(), "b".to_string())]);
    assert_eq!(options.max_len, Some(12));
    assert!(!options.flatten_multiindex);
    assert!(options.reserved_set().contains("total"));
}
