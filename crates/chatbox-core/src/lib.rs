pub mod chat;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod llm;
pub mod storage;

// Re-export key types
pub use chat::{ChatController, ChatEvent, ChatSnapshot, Notice, NoticeLevel, SendOutcome};
pub use config::Settings;
pub use context::{Conversation, ConversationStore, Message, MessageStore, Role};
pub use error::ChatError;
pub use llm::{AiModel, ApiKeys, ModelTag, ProviderId, Responder, SimulatedResponder};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
