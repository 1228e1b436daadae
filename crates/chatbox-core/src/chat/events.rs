use crate::context::{Conversation, Message};
use crate::llm::{AiModel, ApiKeys};

/// Events emitted by the controller - what a view subscribes to.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Something the user should see as a toast.
    Notify(Notice),
    /// A reply is pending; input stays disabled until the next `Updated`.
    Thinking,
    /// State changed; re-render from a fresh snapshot.
    Updated,
    /// A reply resolved after its conversation stopped being the active one.
    ReplyDiscarded { conversation_id: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What happened to a send that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered {
        conversation_id: String,
        reply: String,
    },
    /// The active conversation changed while the reply was pending.
    Discarded,
}

/// Read-only copy of the controller state for rendering.
#[derive(Debug, Clone)]
pub struct ChatSnapshot {
    pub conversations: Vec<Conversation>,
    pub active_conversation_id: Option<String>,
    pub messages: Vec<Message>,
    pub selected_model: AiModel,
    pub api_keys: ApiKeys,
    pub is_loading: bool,
    pub can_send: bool,
}
