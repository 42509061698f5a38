use std::time::Duration;

use crate::error::{BotError, Result};

pub const DEFAULT_FRAME_DELAY_MS: u64 = 250;
pub const DEFAULT_EVENT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubSettings {
    /// Pause after each frame of the creation effect.
    pub frame_delay: Duration,
    /// Upper bound on handling one event, animation included.
    pub event_timeout: Duration,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            event_timeout: Duration::from_secs(DEFAULT_EVENT_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub settings: HubSettings,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("settings", &self.settings)
            .finish()
    }
}

impl BotConfig {
    pub fn new(token: Option<String>, frame_delay_ms: u64, event_timeout_secs: u64) -> Result<Self> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                BotError::Configuration("bot token is missing, set TELEGRAM_TOKEN".to_string())
            })?;

        if event_timeout_secs == 0 {
            return Err(BotError::Configuration(
                "event timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            token,
            settings: HubSettings {
                frame_delay: Duration::from_millis(frame_delay_ms),
                event_timeout: Duration::from_secs(event_timeout_secs),
            },
        })
    }
}
