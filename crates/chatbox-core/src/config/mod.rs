use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{models, simulator, storage};
use crate::error::ChatError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub simulator: SimulatorSettings,
    #[serde(default)]
    pub chat: ChatSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Where the persisted documents live. Defaults to `<data_dir>/chatbox`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_model_id")]
    pub default_model: String,
}

fn default_min_delay_ms() -> u64 {
    simulator::MIN_DELAY_MS
}

fn default_max_delay_ms() -> u64 {
    simulator::MAX_DELAY_MS
}

fn default_model_id() -> String {
    models::DEFAULT_MODEL.to_string()
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            default_model: default_model_id(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(storage::APP_DIR)
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing or unparseable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring malformed config {}: {}", path.display(), e)
                    }
                },
                Err(e) => tracing::warn!("Could not read config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), ChatError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ChatError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ChatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory for the file store, resolved against the platform default.
    pub fn data_dir(&self) -> Result<PathBuf, ChatError> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::storage::FileStore::default_dir(),
        }
    }
}
