//! Reads and writes the two persisted documents.
//!
//! Loads are fail-safe: a missing, unreadable, or malformed document is
//! treated as absent. Saves return their error so the caller decides whether
//! to surface it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::conversations::Conversation;
use crate::constants::storage::{API_KEYS_KEY, CONVERSATIONS_KEY};
use crate::error::Result;
use crate::llm::ApiKeys;
use crate::storage::KeyValueStore;

pub fn load_api_keys(store: &dyn KeyValueStore) -> ApiKeys {
    load_document(store, API_KEYS_KEY).unwrap_or_default()
}

pub fn save_api_keys(store: &dyn KeyValueStore, keys: &ApiKeys) -> Result<()> {
    save_document(store, API_KEYS_KEY, keys)
}

/// Stored conversation summaries, timestamps parsed back into dates.
pub fn load_conversations(store: &dyn KeyValueStore) -> Vec<Conversation> {
    load_document(store, CONVERSATIONS_KEY).unwrap_or_default()
}

pub fn save_conversations(store: &dyn KeyValueStore, conversations: &[Conversation]) -> Result<()> {
    save_document(store, CONVERSATIONS_KEY, &conversations)
}

fn load_document<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Could not read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding malformed {}: {}", key, e);
            None
        }
    }
}

fn save_document<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
