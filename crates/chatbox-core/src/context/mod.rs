mod conversations;
mod history;
pub mod persistence;

pub use conversations::{derive_title, Conversation, ConversationStore, Removed};
pub use history::{Message, MessageStore, Role};

/// Fresh random id for conversations and messages.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
