use chrono::{TimeZone, Utc};
use treeshape_core::{
    Children, FileMeta, MetadataMode, Node, ScanConfig, ScanError, ScanStats, ScanWarning,
    StructureTree, UNKNOWN_TYPE, WarningKind,
};
use std::path::PathBuf;
use std::time::Duration;

fn meta(size: u64, file_type: &str, lines: u64) -> FileMeta {
    FileMeta::new(
        size,
        file_type,
        Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
        lines,
    )
}

#[test]
fn test_node_kind_discrimination() {
    let file = Node::File(Some(meta(10, "txt", 3)));
    assert!(file.is_file());
    assert!(!file.is_dir());
    assert!(file.children().is_none());
    assert_eq!(file.meta().map(|m| m.size), Some(10));

    let bare = Node::File(None);
    assert!(bare.is_file());
    assert!(bare.meta().is_none());

    let dir = Node::empty_dir();
    assert!(dir.is_dir());
    assert!(dir.meta().is_none());
    assert_eq!(dir.children().map(|c| c.len()), Some(0));
}

#[test]
fn test_unknown_type_sentinel() {
    let value = serde_json::to_value(meta(0, UNKNOWN_TYPE, 1)).unwrap();
    assert_eq!(value["type"], "unknown");
}

#[test]
fn test_full_mode_file_has_exactly_four_fields() {
    let value = serde_json::to_value(Node::File(Some(meta(42, "md", 7)))).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["lastModified", "lines", "size", "type"]);
    assert_eq!(object["lastModified"], "2023-12-31T23:59:59.000Z");
}

#[test]
fn test_nested_tree_json_shape() {
    let mut sub = Children::new();
    sub.insert("lib.rs".into(), Node::File(None));

    let mut root = Children::new();
    root.insert("Cargo.toml".into(), Node::File(None));
    root.insert("src".into(), Node::Directory(sub));
    root.insert("empty".into(), Node::empty_dir());

    let json = serde_json::to_string_pretty(&Node::Directory(root)).unwrap();
    let expected = "{\n  \"Cargo.toml\": null,\n  \"src\": {\n    \"lib.rs\": null\n  },\n  \"empty\": {}\n}";
    assert_eq!(json, expected);
}

#[test]
fn test_millisecond_timestamps_survive_parsing() {
    let json = r#"{"size":1,"type":"txt","lastModified":"2024-02-29T08:15:30.250Z","lines":1}"#;
    let node: Node = serde_json::from_str(json).unwrap();
    let meta = node.meta().unwrap();
    assert_eq!(meta.last_modified.timestamp_subsec_millis(), 250);
    assert_eq!(serde_json::to_string(&node).unwrap(), json);
}

#[test]
fn test_config_modes() {
    let config = ScanConfig::builder()
        .root("/project")
        .metadata(MetadataMode::Simple)
        .sort_entries(false)
        .build()
        .unwrap();
    assert!(config.is_simple());
    assert!(!config.sort_entries);
    assert!(!ScanConfig::new("/project").is_simple());
}

#[test]
fn test_structure_tree_accessors() {
    let mut stats = ScanStats::new();
    stats.record_dir(0);
    stats.record_file(10, 3, 1);

    let tree = StructureTree::new(
        Node::empty_dir(),
        PathBuf::from("/project"),
        ScanConfig::new("/project"),
        stats,
        Duration::from_millis(5),
        vec![ScanWarning::permission_denied("/project/locked")],
    );

    assert_eq!(tree.total_files(), 1);
    assert_eq!(tree.total_dirs(), 1);
    assert!(tree.has_warnings());
    assert_eq!(tree.warnings[0].kind, WarningKind::PermissionDenied);
}

#[test]
fn test_scan_error_messages() {
    let err = ScanError::NotFound {
        path: PathBuf::from("/missing"),
    };
    assert_eq!(err.to_string(), "Path not found: /missing");

    let err = ScanError::UnsupportedRoot {
        path: PathBuf::from("/dev/null"),
    };
    assert!(err.to_string().contains("/dev/null"));
}
