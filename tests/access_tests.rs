//! Integration tests for the read-only view over resolved configuration.
//!
//! Loads real files through the resolver and checks the dotted-path access
//! contract, typed accessors, and printing.

use config_cascade::config;
use config_cascade::error::AccessError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A two-layer fixture with scalars, nested mappings, and a sequence.
fn resolved_fixture(temp: &TempDir) -> config_cascade::config::Config {
    write(
        temp.path(),
        "base.yaml",
        "app:\n  name: Base\n  debug: false\nservers:\n  - host: alpha\n  - host: beta\n",
    );
    let root = write(
        temp.path(),
        "config.yaml",
        "extends: [base.yaml]\napp:\n  name: MyApp\n  port: 8080\n",
    );
    config::load_from(root).unwrap()
}

#[test]
fn dotted_access_walks_merged_tree() {
    let temp = TempDir::new().unwrap();
    let loaded = resolved_fixture(&temp);

    assert_eq!(loaded.get("app.port").unwrap().as_i64().unwrap(), 8080);
    assert_eq!(loaded.get("app.name").unwrap().as_str().unwrap(), "MyApp");
    assert!(!loaded.get("app.debug").unwrap().as_bool().unwrap());
}

#[test]
fn missing_key_is_key_not_found_with_full_path() {
    let temp = TempDir::new().unwrap();
    let loaded = resolved_fixture(&temp);

    let err = loaded.get("app.missing").unwrap_err();
    match err {
        AccessError::KeyNotFound { path } => assert_eq!(path, "app.missing"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn descending_through_scalar_is_type_mismatch() {
    let temp = TempDir::new().unwrap();
    let loaded = resolved_fixture(&temp);

    let err = loaded.get("app.port.x").unwrap_err();
    match err {
        AccessError::TypeMismatch { path, expected, .. } => {
            assert_eq!(path, "app.port");
            assert_eq!(expected, "mapping");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sequences_stay_addressable_by_index_then_key() {
    let temp = TempDir::new().unwrap();
    let loaded = resolved_fixture(&temp);

    let servers = loaded.get("servers").unwrap().as_sequence().unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0].get("host").unwrap().as_str().unwrap(), "alpha");

    let second = loaded.get("servers").unwrap().index(1).unwrap();
    assert_eq!(second.get("host").unwrap().as_str().unwrap(), "beta");
    assert_eq!(second.path(), "servers[1]");
}

#[test]
fn view_is_a_stable_snapshot() {
    let temp = TempDir::new().unwrap();
    let loaded = resolved_fixture(&temp);

    // Rewriting the file after load must not affect the merged tree.
    write(temp.path(), "config.yaml", "app: {port: 1}\n");
    assert_eq!(loaded.get("app.port").unwrap().as_i64().unwrap(), 8080);
}

#[test]
fn display_renders_whole_tree_as_pretty_json() {
    let temp = TempDir::new().unwrap();
    let loaded = resolved_fixture(&temp);

    let rendered = loaded.to_string();
    assert!(rendered.contains("\"port\": 8080"));
    assert!(rendered.contains("\"host\": \"alpha\""));
    // Resolution metadata never shows up in output.
    assert!(!rendered.contains("extends"));
}

#[test]
fn subtree_views_print_only_their_subtree() {
    let temp = TempDir::new().unwrap();
    let loaded = resolved_fixture(&temp);

    let app = loaded.get("app").unwrap();
    let rendered = app.to_string();
    assert!(rendered.contains("\"name\": \"MyApp\""));
    assert!(!rendered.contains("servers"));
}
