//! Tests for the application controller

use prompt_forge::app::{App, Theme};
use prompt_forge::config::{Config, ConfigOptions};
use prompt_forge::enhancer::{EnhancementResult, Intensity, PromptEnhancer, HISTORY_LIMIT};
use prompt_forge::error::GENERIC_FAILURE_MESSAGE;
use prompt_forge::store::{Collection, KeyValueStore, MemoryStore};
use prompt_forge::style::predefined_styles;
use prompt_forge::template::{PromptTemplate, TemplateError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_result(n: usize) -> EnhancementResult {
    EnhancementResult {
        original: format!("input {}", n),
        enhanced: format!("enhanced {}", n),
        explanation: "explanation".to_string(),
        key_changes: vec!["change".to_string()],
        tips: vec!["tip".to_string()],
    }
}

fn stored_json(app: &App<MemoryStore>, collection: Collection) -> Option<serde_json::Value> {
    app.snapshots()
        .store()
        .get(collection.key())
        .unwrap()
        .map(|s| serde_json::from_str(&s).unwrap())
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_empty_store_uses_defaults() {
    let app = App::load(MemoryStore::new());
    let state = app.state();

    assert_eq!(state.theme, Theme::Light);
    assert_eq!(state.selected_style, predefined_styles()[0]);
    assert_eq!(state.intensity, Intensity::default());
    assert!(state.history.is_empty());
    assert!(state.custom_styles.is_empty());
    assert!(state.templates.is_empty());
}

#[test]
fn test_load_malformed_snapshots_fall_back() {
    let mut store = MemoryStore::new();
    store.set("prompt_history", "[{\"broken\": ").unwrap();
    store.set("custom_styles", "42").unwrap();
    store.set("theme", "\"purple\"").unwrap();

    let app = App::load(store);
    assert!(app.state().history.is_empty());
    assert!(app.state().custom_styles.is_empty());
    assert_eq!(app.state().theme, Theme::Light);
}

#[test]
fn test_load_drops_custom_styles_shadowing_predefined_ids() {
    let mut store = MemoryStore::new();
    let styles = json!([
        { "id": "creative", "name": "Impostor", "instruction": "x", "isCustom": true },
        { "id": "custom-1", "name": "Noir", "instruction": "Hard-boiled.", "isCustom": true },
        { "id": "custom-1", "name": "Noir again", "instruction": "dup", "isCustom": true }
    ]);
    store.set("custom_styles", &styles.to_string()).unwrap();

    let app = App::load(store);
    assert_eq!(app.state().custom_styles.len(), 1);
    assert_eq!(app.state().custom_styles[0].name, "Noir");
}

// ============================================================================
// Styles
// ============================================================================

#[test]
fn test_add_custom_style_selects_and_persists() {
    let mut app = App::load(MemoryStore::new());
    let style = app.add_custom_style("  Noir ", " Hard-boiled tone. ").unwrap();

    assert!(style.id.starts_with("custom-"));
    assert_eq!(style.name, "Noir");
    assert!(style.is_custom);
    assert_eq!(app.state().selected_style, style);

    let stored = stored_json(&app, Collection::CustomStyles).unwrap();
    assert_eq!(stored[0]["name"], "Noir");
    assert_eq!(stored[0]["isCustom"], true);
}

#[test]
fn test_add_custom_style_rejects_blank() {
    let mut app = App::load(MemoryStore::new());
    assert!(app.add_custom_style("  ", "instruction").is_err());
    assert!(app.add_custom_style("name", "\n").is_err());
    assert!(app.state().custom_styles.is_empty());
}

#[test]
fn test_delete_selected_custom_style_falls_back_to_default() {
    let mut app = App::load(MemoryStore::new());
    let style = app.add_custom_style("Noir", "Hard-boiled tone.").unwrap();

    assert!(app.delete_custom_style(&style.id));
    assert_eq!(app.state().selected_style, predefined_styles()[0]);
    assert_eq!(
        stored_json(&app, Collection::CustomStyles).unwrap(),
        json!([])
    );
}

#[test]
fn test_delete_unselected_custom_style_keeps_selection() {
    let mut app = App::load(MemoryStore::new());
    let style = app.add_custom_style("Noir", "Hard-boiled tone.").unwrap();
    assert!(app.select_style("academic"));

    assert!(app.delete_custom_style(&style.id));
    assert_eq!(app.state().selected_style.id, "academic");
}

#[test]
fn test_predefined_styles_cannot_be_deleted() {
    let mut app = App::load(MemoryStore::new());
    assert!(!app.delete_custom_style("creative"));
    assert!(app.select_style("creative"));
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn test_template_select_fill_and_detach() {
    let mut app = App::load(MemoryStore::new());
    let template = app
        .create_template("Post", "Write a {{topic}} post for {{platform}} about {{topic}}.")
        .unwrap();

    assert!(app.select_template(&template.id));
    assert_eq!(
        app.state().composer.text(),
        "Write a [topic] post for [platform] about [topic]."
    );

    app.set_variable("topic", "Rust");
    app.set_variable("platform", "");
    assert_eq!(
        app.state().composer.text(),
        "Write a Rust post for [platform] about Rust."
    );

    app.edit_input("My own words");
    app.set_variable("platform", "Mastodon");
    assert_eq!(app.state().composer.text(), "My own words");
}

#[test]
fn test_template_upsert_replaces_by_id() {
    let mut app = App::load(MemoryStore::new());
    let template = app.create_template("Greeting", "Hi {{name}}").unwrap();
    app.select_template(&template.id);
    app.set_variable("name", "Sam");

    app.save_template(PromptTemplate {
        id: template.id.clone(),
        name: "Greeting".to_string(),
        content: "Hello {{name}}!".to_string(),
    })
    .unwrap();

    assert_eq!(app.state().templates.len(), 1);
    assert_eq!(app.state().composer.text(), "Hello Sam!");

    let stored = stored_json(&app, Collection::Templates).unwrap();
    assert_eq!(stored[0]["content"], "Hello {{name}}!");
}

#[test]
fn test_template_save_rejects_malformed_placeholders() {
    let mut app = App::load(MemoryStore::new());
    assert_eq!(
        app.create_template("Broken", "Hello {{name").unwrap_err(),
        TemplateError::Unclosed(6)
    );
    assert!(app.state().templates.is_empty());
}

#[test]
fn test_delete_active_template_clears_input() {
    let mut app = App::load(MemoryStore::new());
    let template = app.create_template("Greeting", "Hi {{name}}").unwrap();
    app.select_template(&template.id);

    assert!(app.delete_template(&template.id));
    assert_eq!(app.state().composer.text(), "");
    assert!(app.state().composer.active_template_id().is_none());
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_history_caps_at_twenty_newest_first() {
    let mut app = App::load(MemoryStore::new());
    for n in 0..HISTORY_LIMIT {
        app.record_result(sample_result(n), 1_000 + n as i64);
    }
    assert_eq!(app.state().history.len(), HISTORY_LIMIT);

    app.record_result(sample_result(99), 5_000);

    let history = app.state().history.items();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history[0].result.original, "input 99");
    assert_eq!(history[HISTORY_LIMIT - 1].result.original, "input 1");

    let stored = stored_json(&app, Collection::History).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), HISTORY_LIMIT);
}

#[test]
fn test_clear_history_removes_snapshot() {
    let mut app = App::load(MemoryStore::new());
    app.record_result(sample_result(0), 1);
    assert!(app.snapshots().store().contains("prompt_history"));

    app.clear_history();
    assert!(app.state().history.is_empty());
    assert!(!app.snapshots().store().contains("prompt_history"));
}

#[test]
fn test_restore_history_item() {
    let mut app = App::load(MemoryStore::new());
    app.select_style("casual");
    let id = app.record_result(sample_result(7), 77);

    app.select_style("academic");
    app.edit_input("something else");
    let restored = app.restore_history_item(&id).unwrap();
    assert_eq!(restored.style_name, "Casual");

    let state = app.state();
    assert_eq!(state.selected_style.id, "casual");
    assert_eq!(state.composer.text(), "input 7");
    assert_eq!(state.result.as_ref().unwrap().enhanced, "enhanced 7");
    assert!(app.restore_history_item("missing").is_none());
}

#[test]
fn test_restore_history_item_with_deleted_style_keeps_recorded_name() {
    let mut store = MemoryStore::new();
    let history = json!([{
        "id": "100",
        "timestamp": 100,
        "styleId": "custom-1",
        "styleName": "Noir",
        "result": {
            "original": "a dark street",
            "enhanced": "Rain-slick asphalt under a dead streetlamp.",
            "explanation": "Hard-boiled tone.",
            "keyChanges": [],
            "tips": []
        }
    }]);
    store
        .set(Collection::History.key(), &history.to_string())
        .unwrap();

    let mut app = App::load(store);
    let restored = app.restore_history_item("100").unwrap();

    assert_eq!(restored.style_name, "Noir");
    assert_eq!(restored.style_id, "custom-1");
    assert_eq!(app.state().selected_style.id, "creative");
    assert_eq!(app.state().composer.text(), "a dark street");
}

#[test]
fn test_history_survives_reload() {
    let mut app = App::load(MemoryStore::new());
    app.record_result(sample_result(1), 10);
    app.toggle_theme();

    let store = app.snapshots().store().clone();
    let reloaded = App::load(store);
    assert_eq!(reloaded.state().history.len(), 1);
    assert_eq!(reloaded.state().history.items()[0].style_id, "creative");
    assert_eq!(reloaded.state().theme, Theme::Dark);
}

// ============================================================================
// Enhancement flow
// ============================================================================

fn enhancer_for(server: &MockServer, dir: &tempfile::TempDir) -> PromptEnhancer {
    let config = Config::new(
        "test-key".to_string(),
        ConfigOptions {
            base_url: Some(server.uri()),
            model: Some("test-model".to_string()),
            request_timeout_secs: Some(30),
            data_dir: Some(dir.path().to_path_buf()),
        },
    )
    .unwrap();
    PromptEnhancer::new(config).unwrap()
}

#[tokio::test]
async fn test_enhance_blank_input_makes_no_call() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = App::load(MemoryStore::new());
    app.edit_input("   \n\t");

    let outcome = app.enhance(&enhancer_for(&mock_server, &dir)).await.unwrap();
    assert!(outcome.is_none());
    assert!(app.state().history.is_empty());
}

#[tokio::test]
async fn test_enhance_success_records_history() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let text = json!({
        "original": "a dog",
        "enhanced": "A loyal hound",
        "explanation": "More vivid.",
        "keyChanges": ["Specific noun"],
        "tips": ["Prefer concrete nouns"]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [ { "content": { "parts": [ { "text": text } ] } } ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = App::load(MemoryStore::new());
    app.select_style("image_gen");
    app.set_intensity(Intensity::new(3).unwrap());
    app.edit_input("a dog");

    let result = app
        .enhance(&enhancer_for(&mock_server, &dir))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.original, "a dog");
    assert_eq!(app.state().result.as_ref(), Some(&result));
    assert!(app.state().error.is_none());

    let item = &app.state().history.items()[0];
    assert_eq!(item.style_id, "image_gen");
    assert_eq!(item.style_name, "Image Generation");
    assert_eq!(item.id, item.timestamp.to_string());
}

#[tokio::test]
async fn test_enhance_failure_sets_generic_error() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [ { "content": { "parts": [ { "text": "not json at all" } ] } } ]
        })))
        .mount(&mock_server)
        .await;

    let mut app = App::load(MemoryStore::new());
    app.edit_input("hello");

    let err = app
        .enhance(&enhancer_for(&mock_server, &dir))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
    assert_eq!(app.state().error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    assert!(app.state().history.is_empty());
    assert!(app.state().result.is_none());
}
