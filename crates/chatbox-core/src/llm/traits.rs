use crate::error::ChatError;

/// Produces the assistant reply for a user message.
///
/// The chat controller awaits exactly one call per send and holds no state
/// lock while doing so, so implementations may take as long as they like.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, user_content: &str) -> Result<String, ChatError>;
}
