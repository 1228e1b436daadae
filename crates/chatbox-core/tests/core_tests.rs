use chatbox_core::config::Settings;
use chatbox_core::constants::storage::{API_KEYS_KEY, CONVERSATIONS_KEY};
use chatbox_core::context::persistence;
use chatbox_core::llm::{can_send, catalog, default_model, find_model};
use chatbox_core::*;
use tempfile::TempDir;

// ========================================================================
// Settings Tests (config/mod.rs)
// ========================================================================

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert!(settings.storage.data_dir.is_none());
    assert_eq!(settings.simulator.min_delay_ms, 1000);
    assert_eq!(settings.simulator.max_delay_ms, 3000);
    assert_eq!(settings.chat.default_model, "gpt-4-turbo");
}

#[test]
fn test_settings_save_and_reload_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut settings = Settings::default();
    settings.storage.data_dir = Some(temp_dir.path().join("data"));
    settings.simulator.min_delay_ms = 10;
    settings.simulator.max_delay_ms = 20;
    settings.chat.default_model = "claude-3-opus".to_string();

    settings.save_to(&config_path).unwrap();
    let loaded = Settings::load_from(&config_path);

    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[simulator]\nmax_delay_ms = 500\n").unwrap();

    let loaded = Settings::load_from(&config_path);

    assert_eq!(loaded.simulator.min_delay_ms, 1000);
    assert_eq!(loaded.simulator.max_delay_ms, 500);
    assert_eq!(loaded.chat.default_model, "gpt-4-turbo");
}

#[test]
fn test_settings_malformed_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "this is = = not toml").unwrap();

    assert_eq!(Settings::load_from(&config_path), Settings::default());
}

#[test]
fn test_settings_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let loaded = Settings::load_from(&temp_dir.path().join("absent.toml"));
    assert_eq!(loaded, Settings::default());
}

#[test]
fn test_settings_explicit_data_dir_wins() {
    let mut settings = Settings::default();
    settings.storage.data_dir = Some("/tmp/chatbox-test-data".into());
    assert_eq!(
        settings.data_dir().unwrap(),
        std::path::PathBuf::from("/tmp/chatbox-test-data")
    );
}

// ========================================================================
// Model Catalog Tests (llm/provider.rs)
// ========================================================================

#[test]
fn test_catalog_contents() {
    let models = catalog();
    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["gpt-4-turbo", "gpt-3.5-turbo", "claude-3-opus", "claude-3-sonnet"]
    );
}

#[test]
fn test_default_model_is_gpt4_turbo() {
    let model = default_model();
    assert_eq!(model.id, "gpt-4-turbo");
    assert_eq!(model.name, "GPT-4 Turbo");
    assert_eq!(model.provider, ProviderId::OpenAI);
}

#[test]
fn test_find_model() {
    assert_eq!(
        find_model("claude-3-sonnet").map(|m| m.provider),
        Some(ProviderId::Anthropic)
    );
    assert!(find_model("gpt-5").is_none());
}

// ========================================================================
// API-Key Gate Tests
// ========================================================================

#[test]
fn test_gate_matches_trimmed_lowercase_lookup() {
    let providers = ["OpenAI", "openai", "Anthropic", "GEMINI", "Unknown"];
    let secrets = [None, Some(""), Some("   "), Some("\t\n"), Some("sk-x"), Some("  sk-y  ")];

    for provider in providers {
        for secret in secrets {
            let mut keys = ApiKeys::new();
            if let Some(secret) = secret {
                keys.set(&provider.to_lowercase(), secret);
            }
            let expected = secret.map(|s| !s.trim().is_empty()).unwrap_or(false);
            assert_eq!(
                keys.has_usable_key(provider),
                expected,
                "provider={provider:?} secret={secret:?}"
            );
        }
    }
}

#[test]
fn test_gate_uses_selected_models_provider() {
    let keys = ApiKeys::new().with("openai", "sk-x");

    let gpt = find_model("gpt-3.5-turbo").unwrap();
    let claude = find_model("claude-3-opus").unwrap();

    assert!(can_send(&gpt, &keys));
    assert!(!can_send(&claude, &keys));
}

#[test]
fn test_gate_ignores_keys_for_other_providers() {
    let keys = ApiKeys::new().with("anthropic", "sk-ant").with("gemini", "AI-x");
    assert!(!can_send(&default_model(), &keys));
}

// ========================================================================
// MessageStore Tests (context/history.rs)
// ========================================================================

#[test]
fn test_message_store_append_and_clear() {
    let mut store = MessageStore::new();

    store.append_user("Hello");
    store.append_assistant("Hi there!");

    assert_eq!(store.len(), 2);
    assert_eq!(store.messages()[0].role, Role::User);
    assert_eq!(store.messages()[0].content, "Hello");
    assert_eq!(store.messages()[1].role, Role::Assistant);
    assert_eq!(store.last_message().unwrap().content, "Hi there!");

    store.clear();
    assert!(store.is_empty());
    assert!(store.last_message().is_none());
}

#[test]
fn test_message_ids_unique_under_rapid_appends() {
    let mut store = MessageStore::new();
    for i in 0..1000 {
        store.append_user(format!("m{i}"));
    }

    let mut ids: Vec<&str> = store.messages().iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 1000);
}

// ========================================================================
// ConversationStore Tests (context/conversations.rs)
// ========================================================================

#[test]
fn test_first_send_creates_active_conversation() {
    let mut store = ConversationStore::new();

    let created = store.create_or_update("Hello world").clone();

    assert_eq!(store.len(), 1);
    assert_eq!(created.title, "Hello world");
    assert_eq!(created.last_message, "Hello world");
    assert_eq!(store.active_id(), Some(created.id.as_str()));
}

#[test]
fn test_long_first_message_truncates_title() {
    let mut store = ConversationStore::new();
    let content = "abcdefghij".repeat(6);
    assert_eq!(content.chars().count(), 60);

    let created = store.create_or_update(&content);

    assert_eq!(created.title, format!("{}...", &content[..50]));
    assert_eq!(created.last_message, content);
}

#[test]
fn test_update_keeps_position_and_count() {
    let mut store = ConversationStore::new();
    let older = store.create_or_update("older").id.clone();
    store.start_new();
    let newer = store.create_or_update("newer").id.clone();

    // Newest created first.
    let order: Vec<&str> = store.conversations().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec![newer.as_str(), older.as_str()]);

    store.select(&older).unwrap();
    let before = store.get(&older).unwrap().timestamp;
    store.create_or_update("follow-up");

    assert_eq!(store.len(), 2);
    let order: Vec<&str> = store.conversations().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec![newer.as_str(), older.as_str()]);

    let updated = store.get(&older).unwrap();
    assert_eq!(updated.last_message, "follow-up");
    assert_eq!(updated.title, "older");
    assert!(updated.timestamp >= before);
}

#[test]
fn test_delete_active_clears_pointer() {
    let mut store = ConversationStore::new();
    let id = store.create_or_update("to delete").id.clone();

    let removed = store.delete(&id).unwrap();

    assert!(removed.was_active);
    assert_eq!(removed.conversation.id, id);
    assert!(store.is_empty());
    assert!(store.active_id().is_none());
}

#[test]
fn test_delete_inactive_keeps_pointer() {
    let mut store = ConversationStore::new();
    let first = store.create_or_update("first").id.clone();
    store.start_new();
    let second = store.create_or_update("second").id.clone();

    let removed = store.delete(&first).unwrap();

    assert!(!removed.was_active);
    assert_eq!(store.len(), 1);
    assert_eq!(store.active_id(), Some(second.as_str()));
}

#[test]
fn test_delete_unknown_is_none() {
    let mut store = ConversationStore::new();
    store.create_or_update("keep");
    assert!(store.delete("missing").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_from_saved_has_no_active() {
    let saved = vec![Conversation::from_first_message("a")];
    let store = ConversationStore::from_saved(saved);
    assert_eq!(store.len(), 1);
    assert!(store.active().is_none());
}

// ========================================================================
// Persistence Tests (context/persistence.rs, storage/)
// ========================================================================

#[test]
fn test_conversations_roundtrip_through_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = ConversationStore::new();
    store.create_or_update(&"long ".repeat(20));
    store.start_new();
    store.create_or_update("short");
    let saved = store.conversations().to_vec();

    {
        let files = FileStore::with_dir(temp_dir.path()).unwrap();
        persistence::save_conversations(&files, &saved).unwrap();
    }

    let reopened = FileStore::with_dir(temp_dir.path()).unwrap();
    let loaded = persistence::load_conversations(&reopened);

    assert_eq!(loaded, saved);
}

#[test]
fn test_api_keys_roundtrip_verbatim() {
    let store = MemoryStore::new();
    let keys = ApiKeys::new()
        .with("openai", "sk-x")
        .with("anthropic", "  sk-ant-padded  ");

    persistence::save_api_keys(&store, &keys).unwrap();

    let raw = store.get(API_KEYS_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["openai"], "sk-x");
    assert_eq!(json["anthropic"], "  sk-ant-padded  ");

    assert_eq!(persistence::load_api_keys(&store), keys);
}

#[test]
fn test_malformed_documents_load_as_empty() {
    let store = MemoryStore::with_entries([
        (API_KEYS_KEY, "{not json"),
        (CONVERSATIONS_KEY, "[{\"id\": 1}]"),
    ]);

    assert!(persistence::load_api_keys(&store).is_empty());
    assert!(persistence::load_conversations(&store).is_empty());
}

#[test]
fn test_missing_documents_load_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let files = FileStore::with_dir(temp_dir.path().join("fresh")).unwrap();

    assert!(persistence::load_api_keys(&files).is_empty());
    assert!(persistence::load_conversations(&files).is_empty());
}

#[test]
fn test_file_store_overwrite_replaces_contents() {
    let temp_dir = TempDir::new().unwrap();
    let files = FileStore::with_dir(temp_dir.path()).unwrap();

    files.set(API_KEYS_KEY, r#"{"openai":"sk-old"}"#).unwrap();
    files.set(API_KEYS_KEY, "{}").unwrap();

    assert_eq!(files.get(API_KEYS_KEY).unwrap().as_deref(), Some("{}"));
}
