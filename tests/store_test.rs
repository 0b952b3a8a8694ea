//! Tests for the file-backed snapshot store

use std::fs;

use prompt_forge::app::{App, Theme};
use prompt_forge::enhancer::EnhancementResult;
use prompt_forge::store::{Collection, FileStore, KeyValueStore, Snapshots};
use tempfile::TempDir;

#[test]
fn test_file_store_get_missing_key() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path());
    assert!(store.get("theme").unwrap().is_none());
}

#[test]
fn test_file_store_set_replaces_whole_document() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::new(temp_dir.path());

    store.set("custom_styles", "[1,2,3]").unwrap();
    store.set("custom_styles", "[]").unwrap();

    let content = fs::read_to_string(temp_dir.path().join("custom_styles.json")).unwrap();
    assert_eq!(content, "[]");
}

#[test]
fn test_file_store_creates_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");
    let mut store = FileStore::new(&nested);

    store.set("theme", "\"dark\"").unwrap();
    assert!(nested.join("theme.json").exists());
}

#[test]
fn test_file_store_remove_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::new(temp_dir.path());

    store.set("prompt_history", "[]").unwrap();
    store.remove("prompt_history").unwrap();
    store.remove("prompt_history").unwrap();
    assert!(store.get("prompt_history").unwrap().is_none());
}

#[test]
fn test_snapshots_keys_are_fixed() {
    assert_eq!(Collection::Theme.key(), "theme");
    assert_eq!(Collection::History.key(), "prompt_history");
    assert_eq!(Collection::CustomStyles.key(), "custom_styles");
    assert_eq!(Collection::Templates.key(), "prompt_templates");
}

#[test]
fn test_snapshots_malformed_file_loads_default() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("prompt_templates.json"), "not json").unwrap();

    let snapshots = Snapshots::new(FileStore::new(temp_dir.path()));
    let templates: Vec<prompt_forge::PromptTemplate> = snapshots.load(Collection::Templates);
    assert!(templates.is_empty());
}

#[test]
fn test_app_state_round_trips_through_files() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut app = App::load(FileStore::new(temp_dir.path()));
        app.set_theme(Theme::Dark);
        app.add_custom_style("Noir", "Hard-boiled tone.").unwrap();
        app.create_template("Greeting", "Hi {{name}}").unwrap();
        app.record_result(
            EnhancementResult {
                original: "hi".to_string(),
                enhanced: "Hello there".to_string(),
                explanation: "Warmer".to_string(),
                key_changes: vec![],
                tips: vec![],
            },
            1_700_000_000_000,
        );
    }

    let app = App::load(FileStore::new(temp_dir.path()));
    let state = app.state();
    assert_eq!(state.theme, Theme::Dark);
    assert_eq!(state.custom_styles.len(), 1);
    assert_eq!(state.templates.len(), 1);
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history.items()[0].id, "1700000000000");

    let raw = fs::read_to_string(temp_dir.path().join("prompt_history.json")).unwrap();
    assert!(raw.contains("\"styleName\""));
    assert!(raw.contains("\"keyChanges\""));
}
