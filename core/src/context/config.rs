//! Application configuration
//!
//! Re-exports the shared settings from tempo-types and loads the stored
//! file through confy (`tempo/config.toml` in the platform config directory).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tempo_types::{DEFAULT_POLL_INTERVAL_MS, DisplaySettings, TimerSettings};

use super::ConfigError;

pub const APP_NAME: &str = "tempo";
pub const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub timers: TimerSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Load the stored config, falling back to defaults if it can't be read.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Using default configuration");
                Self::default()
            }
        }
    }

    pub fn try_load() -> Result<Self, ConfigError> {
        let config: Self = confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)?;
        Ok(config.normalized())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }

    /// Replace settings that would break the update loops with defaults.
    pub fn normalized(mut self) -> Self {
        if !self.timers.is_valid() {
            tracing::warn!(
                configured = self.timers.poll_interval_ms,
                fallback = DEFAULT_POLL_INTERVAL_MS,
                "Invalid poll interval in configuration"
            );
            self.timers.poll_interval_ms = DEFAULT_POLL_INTERVAL_MS;
        }
        self
    }

    /// Apply a command-line poll interval on top of the stored one.
    pub fn with_poll_interval_override(mut self, poll_interval_ms: Option<u64>) -> Self {
        if let Some(ms) = poll_interval_ms {
            self.timers.poll_interval_ms = ms;
        }
        self.normalized()
    }
}
