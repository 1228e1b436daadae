use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::models::DEFAULT_MODEL;

/// Identifies an upstream AI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAI,
    Anthropic,
    Gemini,
}

impl ProviderId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
        }
    }

    /// Key under which this provider's secret is stored.
    pub fn key(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }

    /// Label shown next to the key field in the settings form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI API Key",
            Self::Anthropic => "Anthropic API Key",
            Self::Gemini => "Google Gemini API Key",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::OpenAI => "sk-...",
            Self::Anthropic => "sk-ant-...",
            Self::Gemini => "AI...",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|p| p.key() == s.trim().to_lowercase())
    }

    pub fn all() -> Vec<ProviderId> {
        vec![Self::OpenAI, Self::Anthropic, Self::Gemini]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Badge a view maps to an icon and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTag {
    Bot,
    Zap,
    Cpu,
}

/// A selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiModel {
    pub id: String,
    pub name: String,
    pub provider: ProviderId,
    pub description: String,
    pub tag: ModelTag,
}

/// All models offered by the model picker, in display order.
pub fn catalog() -> Vec<AiModel> {
    vec![
        AiModel {
            id: "gpt-4-turbo".into(),
            name: "GPT-4 Turbo".into(),
            provider: ProviderId::OpenAI,
            description: "Most capable and fast".into(),
            tag: ModelTag::Bot,
        },
        AiModel {
            id: "gpt-3.5-turbo".into(),
            name: "GPT-3.5 Turbo".into(),
            provider: ProviderId::OpenAI,
            description: "Fast and efficient".into(),
            tag: ModelTag::Zap,
        },
        AiModel {
            id: "claude-3-opus".into(),
            name: "Claude 3 Opus".into(),
            provider: ProviderId::Anthropic,
            description: "Advanced reasoning".into(),
            tag: ModelTag::Cpu,
        },
        AiModel {
            id: "claude-3-sonnet".into(),
            name: "Claude 3 Sonnet".into(),
            provider: ProviderId::Anthropic,
            description: "Perfect balance".into(),
            tag: ModelTag::Bot,
        },
    ]
}

pub fn find_model(id: &str) -> Option<AiModel> {
    catalog().into_iter().find(|m| m.id == id)
}

/// The model selected on startup.
pub fn default_model() -> AiModel {
    find_model(DEFAULT_MODEL).unwrap_or_else(|| {
        // The catalog always contains DEFAULT_MODEL; first entry otherwise.
        catalog().remove(0)
    })
}

/// Provider key → secret, persisted verbatim.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeys(BTreeMap<String, String>);

impl ApiKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `secret` for `provider` (lowercased).
    pub fn set(&mut self, provider: &str, secret: impl Into<String>) {
        self.0.insert(provider.to_lowercase(), secret.into());
    }

    pub fn with(mut self, provider: &str, secret: impl Into<String>) -> Self {
        self.set(provider, secret);
        self
    }

    /// Drop the entry for `provider` entirely.
    pub fn remove(&mut self, provider: &str) -> Option<String> {
        self.0.remove(&provider.to_lowercase())
    }

    /// Store `secret`, or remove the entry when `secret` is empty.
    pub fn update(&mut self, provider: &str, secret: impl Into<String>) {
        let secret = secret.into();
        if secret.is_empty() {
            self.remove(provider);
        } else {
            self.set(provider, secret);
        }
    }

    /// Secret stored for `provider`; the lookup lowercases the provider name.
    pub fn get(&self, provider: &str) -> Option<&str> {
        self.0.get(&provider.to_lowercase()).map(String::as_str)
    }

    /// True iff a secret exists for `provider` and is non-blank.
    pub fn has_usable_key(&self, provider: &str) -> bool {
        self.get(provider)
            .map(|secret| !secret.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Secrets never reach logs.
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Whether a message may be sent with `model` given the stored `keys`.
pub fn can_send(model: &AiModel, keys: &ApiKeys) -> bool {
    keys.has_usable_key(model.provider.name())
}
