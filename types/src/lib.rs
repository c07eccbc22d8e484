//! Shared configuration types for tempo
//!
//! This crate contains serializable settings shared between the stopwatch
//! engine (tempo-core) and the terminal front end (tempo-cli).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Poll interval used when none is configured, or when zero is configured.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

// ─────────────────────────────────────────────────────────────────────────────
// Timer Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for the per-timer update loops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Milliseconds between two elapsed-time reports for a running timer
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl TimerSettings {
    pub fn with_poll_interval_ms(poll_interval_ms: u64) -> Self {
        Self { poll_interval_ms }
    }

    /// Effective poll interval. A zero interval would spin, so it maps to the default.
    pub fn poll_interval(&self) -> Duration {
        if self.poll_interval_ms == 0 {
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        } else {
            Duration::from_millis(self.poll_interval_ms)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.poll_interval_ms > 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Terminal display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Redraw the live `Timer 'x': HH:MM:SS` line while timers run
    #[serde(default = "default_true")]
    pub live_updates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { live_updates: true }
    }
}
