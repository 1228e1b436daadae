use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::generate_id;
use crate::constants::conversation::{TITLE_ELLIPSIS, TITLE_MAX_CHARS};
use crate::error::{ChatError, Result};

/// Summary of a conversation as shown in the sidebar and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
}

impl Conversation {
    /// Start a conversation from its first message.
    pub fn from_first_message(content: &str) -> Self {
        Self {
            id: generate_id(),
            title: derive_title(content),
            last_message: content.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// First `TITLE_MAX_CHARS` characters of `content`, with `...` appended when
/// anything was cut.
pub fn derive_title(content: &str) -> String {
    let mut chars = content.chars();
    let title: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}{}", title, TITLE_ELLIPSIS)
    } else {
        title
    }
}

/// A conversation taken out of the store.
#[derive(Debug, Clone)]
pub struct Removed {
    pub conversation: Conversation,
    /// The conversation was the active one; the active pointer is now cleared.
    pub was_active: bool,
}

/// Conversation summaries, newest-created first, plus the active pointer.
///
/// `active_id` is always `None` or the id of a stored conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted summaries. Nothing is active after a reload.
    pub fn from_saved(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            active_id: None,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Record a completed send of `content`.
    ///
    /// With no active conversation a new one is prepended and made active;
    /// otherwise the active one's `last_message` and `timestamp` are updated
    /// in place.
    pub fn create_or_update(&mut self, content: &str) -> &Conversation {
        let active_idx = self
            .active_id
            .as_deref()
            .and_then(|id| self.conversations.iter().position(|c| c.id == id));

        match active_idx {
            Some(idx) => {
                let conversation = &mut self.conversations[idx];
                conversation.last_message = content.to_string();
                conversation.timestamp = Utc::now();
                &self.conversations[idx]
            }
            None => {
                let conversation = Conversation::from_first_message(content);
                tracing::debug!(id = %conversation.id, "created conversation");
                self.active_id = Some(conversation.id.clone());
                self.conversations.insert(0, conversation);
                &self.conversations[0]
            }
        }
    }

    /// Make `id` the active conversation.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(ChatError::not_found("Conversation", id));
        }
        self.active_id = Some(id.to_string());
        Ok(())
    }

    /// Clear the active pointer so the next send starts a new conversation.
    pub fn start_new(&mut self) {
        self.active_id = None;
    }

    pub fn delete(&mut self, id: &str) -> Option<Removed> {
        let idx = self.conversations.iter().position(|c| c.id == id)?;
        let conversation = self.conversations.remove(idx);

        let was_active = self.active_id.as_deref() == Some(id);
        if was_active {
            self.active_id = None;
        }

        Some(Removed {
            conversation,
            was_active,
        })
    }
}
