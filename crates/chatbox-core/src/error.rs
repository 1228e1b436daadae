use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("No API key configured for {provider}")]
    GateRejected { provider: String },

    #[error("Message is empty")]
    EmptyMessage,

    #[error("A message is already being processed")]
    SendInFlight,

    #[error("Response failed: {0}")]
    SimulationFailed(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn gate_rejected(provider: impl Into<String>) -> Self {
        Self::GateRejected {
            provider: provider.into(),
        }
    }

    /// Errors that leave every store untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::GateRejected { .. } | Self::EmptyMessage | Self::SendInFlight
        )
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
