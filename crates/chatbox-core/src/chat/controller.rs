use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;

use super::events::{ChatEvent, ChatSnapshot, Notice, SendOutcome};
use crate::config::Settings;
use crate::constants::notices;
use crate::context::persistence;
use crate::context::{ConversationStore, MessageStore};
use crate::error::{ChatError, Result};
use crate::llm::{
    can_send, default_model, find_model, AiModel, ApiKeys, Responder, SimulatedResponder,
};
use crate::storage::KeyValueStore;

struct ChatState {
    conversations: ConversationStore,
    messages: MessageStore,
    selected_model: AiModel,
    api_keys: ApiKeys,
    /// Bumped whenever the message list is reset for a different session.
    epoch: u64,
}

/// Owns all chat state. Views call the intent methods and render snapshots.
pub struct ChatController {
    state: Mutex<ChatState>,
    /// Set while a reply is pending. Only raised with `state` locked.
    loading: AtomicBool,
    storage: Arc<dyn KeyValueStore>,
    responder: Arc<dyn Responder>,
    event_tx: Option<UnboundedSender<ChatEvent>>,
}

impl ChatController {
    /// Restore persisted keys and conversations from `storage`.
    ///
    /// Nothing is active after a load and the default model is selected.
    pub fn load(storage: Arc<dyn KeyValueStore>, responder: Arc<dyn Responder>) -> Self {
        let api_keys = persistence::load_api_keys(storage.as_ref());
        let conversations = persistence::load_conversations(storage.as_ref());
        tracing::debug!(
            conversations = conversations.len(),
            providers = api_keys.len(),
            "loaded chat state"
        );

        Self {
            state: Mutex::new(ChatState {
                conversations: ConversationStore::from_saved(conversations),
                messages: MessageStore::new(),
                selected_model: default_model(),
                api_keys,
                epoch: 0,
            }),
            loading: AtomicBool::new(false),
            storage,
            responder,
            event_tx: None,
        }
    }

    /// Build a controller with the simulated backend configured by `settings`.
    pub fn from_settings(settings: &Settings, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let responder = SimulatedResponder::from_settings(&settings.simulator)?;
        let model = find_model(&settings.chat.default_model)
            .ok_or_else(|| ChatError::UnknownModel(settings.chat.default_model.clone()))?;
        Ok(Self::load(storage, Arc::new(responder)).with_model(model))
    }

    pub fn with_events(mut self, event_tx: UnboundedSender<ChatEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    pub fn with_model(mut self, model: AiModel) -> Self {
        self.state.get_mut().selected_model = model;
        self
    }

    /// Send `content` and wait for the reply.
    ///
    /// Rejections (`EmptyMessage`, `SendInFlight`, `GateRejected`) leave all
    /// state untouched. On a failed reply the user message stays in place.
    pub async fn send_message(&self, content: &str) -> Result<SendOutcome> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let (epoch, origin, loading) = {
            let mut state = self.state.lock().await;
            if self.loading.load(Ordering::SeqCst) {
                return Err(ChatError::SendInFlight);
            }
            if !can_send(&state.selected_model, &state.api_keys) {
                let provider = state.selected_model.provider.name().to_string();
                drop(state);
                tracing::debug!(%provider, "send rejected: no usable API key");
                self.notify(Notice::error(
                    notices::KEY_REQUIRED_TITLE,
                    notices::KEY_REQUIRED_BODY,
                ));
                return Err(ChatError::gate_rejected(provider));
            }

            state.messages.append_user(content);
            (
                state.epoch,
                state.conversations.active_id().map(str::to_string),
                LoadingGuard::raise(&self.loading),
            )
        };
        self.emit(ChatEvent::Updated);
        self.emit(ChatEvent::Thinking);

        let result = self.responder.respond(content).await;

        let mut state = self.state.lock().await;
        drop(loading);

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                drop(state);
                tracing::warn!("Reply failed: {}", e);
                self.notify(Notice::error(
                    notices::SEND_FAILED_TITLE,
                    notices::SEND_FAILED_BODY,
                ));
                self.emit(ChatEvent::Updated);
                return Err(match e {
                    ChatError::SimulationFailed(_) => e,
                    other => ChatError::SimulationFailed(other.to_string()),
                });
            }
        };

        if state.epoch != epoch {
            drop(state);
            tracing::warn!(
                conversation = origin.as_deref().unwrap_or("<new>"),
                "Discarding reply for a conversation that is no longer active"
            );
            self.emit(ChatEvent::ReplyDiscarded {
                conversation_id: origin,
            });
            self.emit(ChatEvent::Updated);
            return Ok(SendOutcome::Discarded);
        }

        state.messages.append_assistant(reply.clone());
        let conversation_id = state.conversations.create_or_update(content).id.clone();
        self.persist_conversations(&state);
        drop(state);

        self.emit(ChatEvent::Updated);
        Ok(SendOutcome::Delivered {
            conversation_id,
            reply,
        })
    }

    /// Make `id` active. Its messages are not restored; the list starts empty.
    pub async fn select_conversation(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.conversations.select(id)?;
        Self::reset_session(&mut state);
        self.persist_conversations(&state);
        drop(state);

        self.emit(ChatEvent::Updated);
        Ok(())
    }

    pub async fn new_conversation(&self) {
        let mut state = self.state.lock().await;
        state.conversations.start_new();
        Self::reset_session(&mut state);
        self.persist_conversations(&state);
        drop(state);

        self.emit(ChatEvent::Updated);
    }

    pub async fn delete_conversation(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let removed = state
            .conversations
            .delete(id)
            .ok_or_else(|| ChatError::not_found("Conversation", id))?;
        if removed.was_active {
            Self::reset_session(&mut state);
        }
        self.persist_conversations(&state);
        drop(state);

        tracing::debug!(id, was_active = removed.was_active, "deleted conversation");
        self.emit(ChatEvent::Updated);
        Ok(())
    }

    pub async fn change_model(&self, model: AiModel) {
        let mut state = self.state.lock().await;
        tracing::debug!(model = %model.id, "model changed");
        state.selected_model = model;
        drop(state);

        self.emit(ChatEvent::Updated);
    }

    /// Select the catalog model with `id`.
    pub async fn change_model_by_id(&self, id: &str) -> Result<AiModel> {
        let model = find_model(id).ok_or_else(|| ChatError::UnknownModel(id.to_string()))?;
        self.change_model(model.clone()).await;
        Ok(model)
    }

    /// Replace the stored keys and persist them.
    pub async fn save_api_keys(&self, keys: ApiKeys) {
        let mut state = self.state.lock().await;
        if let Err(e) = persistence::save_api_keys(self.storage.as_ref(), &keys) {
            tracing::warn!("Failed to persist API keys: {}", e);
        }
        state.api_keys = keys;
        drop(state);

        self.notify(Notice::info(
            notices::KEYS_SAVED_TITLE,
            notices::KEYS_SAVED_BODY,
        ));
        self.emit(ChatEvent::Updated);
    }

    /// Gate for the selected model, evaluated against the current keys.
    pub async fn can_send(&self) -> bool {
        let state = self.state.lock().await;
        can_send(&state.selected_model, &state.api_keys)
    }

    pub async fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        let state = self.state.lock().await;
        ChatSnapshot {
            conversations: state.conversations.conversations().to_vec(),
            active_conversation_id: state.conversations.active_id().map(str::to_string),
            messages: state.messages.messages().to_vec(),
            selected_model: state.selected_model.clone(),
            api_keys: state.api_keys.clone(),
            is_loading: self.loading.load(Ordering::SeqCst),
            can_send: can_send(&state.selected_model, &state.api_keys),
        }
    }

    fn reset_session(state: &mut ChatState) {
        state.messages.clear();
        state.epoch += 1;
    }

    // Best effort: a failed write is logged and otherwise ignored.
    fn persist_conversations(&self, state: &ChatState) {
        let conversations = state.conversations.conversations();
        if let Err(e) = persistence::save_conversations(self.storage.as_ref(), conversations) {
            tracing::warn!("Failed to persist conversations: {}", e);
        }
    }

    fn notify(&self, notice: Notice) {
        self.emit(ChatEvent::Notify(notice));
    }

    fn emit(&self, event: ChatEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }
}

/// Clears the loading flag when dropped, including when the send future is
/// cancelled while awaiting the reply.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
