use rand::Rng;
use std::time::Duration;

use super::traits::Responder;
use crate::config::SimulatorSettings;
use crate::constants::simulator::{DISCLAIMER, MAX_DELAY_MS, MIN_DELAY_MS, OPENINGS};
use crate::error::{ChatError, Result};

/// Demo backend: answers every message with a canned reply after a random
/// delay in `[min_delay, max_delay)`. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedResponder {
    min_delay: Duration,
    max_delay: Duration,
}

impl SimulatedResponder {
    pub fn new() -> Self {
        Self {
            min_delay: Duration::from_millis(MIN_DELAY_MS),
            max_delay: Duration::from_millis(MAX_DELAY_MS),
        }
    }

    pub fn with_delay_range(min_delay: Duration, max_delay: Duration) -> Result<Self> {
        if min_delay > max_delay {
            return Err(ChatError::Config(format!(
                "simulator min delay ({}ms) exceeds max delay ({}ms)",
                min_delay.as_millis(),
                max_delay.as_millis()
            )));
        }
        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    pub fn from_settings(settings: &SimulatorSettings) -> Result<Self> {
        Self::with_delay_range(
            Duration::from_millis(settings.min_delay_ms),
            Duration::from_millis(settings.max_delay_ms),
        )
    }

    /// Draw a delay uniformly from `[min_delay, max_delay)`.
    pub fn sample_delay(&self) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        rand::rng().random_range(self.min_delay..self.max_delay)
    }
}

impl Default for SimulatedResponder {
    fn default() -> Self {
        Self::new()
    }
}

/// One of the canned openings followed by the demo disclaimer.
pub fn canned_reply() -> String {
    let idx = rand::rng().random_range(0..OPENINGS.len());
    format!("{}\n\n{}", OPENINGS[idx], DISCLAIMER)
}

#[async_trait::async_trait]
impl Responder for SimulatedResponder {
    async fn respond(&self, user_content: &str) -> std::result::Result<String, ChatError> {
        let delay = self.sample_delay();
        tracing::debug!(
            delay_ms = delay.as_millis() as u64,
            chars = user_content.chars().count(),
            "simulating reply"
        );
        tokio::time::sleep(delay).await;
        Ok(canned_reply())
    }
}
