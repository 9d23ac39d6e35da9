//! End-to-end round trip over the sample configuration tree
//!
//! collect -> forward -> document -> backward -> materialize, checked
//! against `test-fixtures/configs`.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::Value;
use shaper_content::{FormatRegistry, RegistryConfig, YamlOptions};
use shaper_core::{DirectoryManager, ShaperConfig, as_tree, backward, filter_keys, forward};
use shaper_test_utils::{FixtureDir, snapshot_dir};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/configs")
}

fn sample_document(manager: &DirectoryManager) -> Value {
    let collection = manager.collect(&fixtures().join("sample")).unwrap();
    assert!(collection.failures.is_empty(), "{:?}", collection.failures);
    assert_eq!(collection.skipped, vec!["notes.md"]);
    Value::Object(forward(collection.entries))
}

#[test]
fn test_collect_matches_expected_document() {
    let manager = DirectoryManager::default();
    let document = sample_document(&manager);

    let expected = manager
        .registry()
        .read(&fixtures().join("expected.yml"))
        .unwrap();
    // String comparison so key order counts
    assert_eq!(
        serde_json::to_string_pretty(&document).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[test]
fn test_document_round_trip_restores_every_file() {
    let manager = DirectoryManager::default();
    let document = sample_document(&manager);

    // Through a YAML file on disk, as `shaper read` + `shaper write` would
    let work = TempDir::new().unwrap();
    let doc_path = work.path().join("doc.yml");
    manager.registry().write(&document, &doc_path).unwrap();
    let reloaded = manager.registry().read(&doc_path).unwrap();

    let out = FixtureDir::new();
    let report = manager
        .materialize(&backward(as_tree(&reloaded).unwrap()), out.root())
        .unwrap();
    assert!(report.is_clean());

    let mut expected = snapshot_dir(&fixtures().join("sample"));
    expected.remove("notes.md");
    assert_eq!(out.snapshot(), expected);
}

#[test]
fn test_json_document_round_trip() {
    let manager = DirectoryManager::default();
    let document = sample_document(&manager);

    let work = TempDir::new().unwrap();
    let doc_path = work.path().join("doc.json");
    manager.registry().write(&document, &doc_path).unwrap();
    let reloaded = manager.registry().read(&doc_path).unwrap();
    assert_eq!(
        serde_json::to_string(&reloaded).unwrap(),
        serde_json::to_string(&document).unwrap()
    );
}

#[test]
fn test_flow_yaml_document_round_trip() {
    let manager = DirectoryManager::new(FormatRegistry::with_config(RegistryConfig {
        yaml: YamlOptions {
            preserve_order: true,
            literal_block_for_multiline: false,
        },
        ..RegistryConfig::default()
    }));
    let document = sample_document(&manager);

    let work = TempDir::new().unwrap();
    let doc_path = work.path().join("doc.yaml");
    manager.registry().write(&document, &doc_path).unwrap();
    assert!(std::fs::read_to_string(&doc_path).unwrap().contains("\\n"));

    let reloaded = manager.registry().read(&doc_path).unwrap();
    assert_eq!(
        serde_json::to_string(&reloaded).unwrap(),
        serde_json::to_string(&document).unwrap()
    );
}

#[test]
fn test_filtered_write_back() {
    let manager = DirectoryManager::default();
    let document = sample_document(&manager);

    let out = FixtureDir::new();
    let flat = filter_keys(backward(as_tree(&document).unwrap()), "svc/");
    manager.materialize(&flat, out.root()).unwrap();
    assert_eq!(out.files(), vec!["svc/app.properties", "svc/db.json"]);
}

#[test]
fn test_configured_manager_from_toml() {
    let dir = FixtureDir::new().with_file(
        "shaper.toml",
        "[registry]\ndefault_text_codec = false\n\n[collect]\nkeep_empty = true\n",
    );
    let config = ShaperConfig::discover(dir.root()).unwrap();
    let manager = config.manager();

    let collection = manager.collect(&fixtures().join("sample")).unwrap();
    assert!(!collection.entries.contains_key("README"));
    assert_eq!(collection.skipped, vec!["README", "notes.md"]);
}
