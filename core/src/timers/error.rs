//! Error types for timer operations

use thiserror::Error;

/// Errors from registry and timer transitions.
///
/// All of them are recoverable and leave the registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer label must not be empty")]
    EmptyLabel,

    #[error("timer '{label}' already exists")]
    DuplicateLabel { label: String },

    #[error("no timer named '{label}'")]
    NotFound { label: String },

    #[error("timer '{label}' is already running")]
    AlreadyRunning { label: String },

    #[error("timer '{label}' is not running")]
    NotRunning { label: String },

    #[error("timer '{label}' is not stopped")]
    NotStopped { label: String },

    #[error("timer '{label}' is stopped; use restart to resume it")]
    UseRestart { label: String },
}
