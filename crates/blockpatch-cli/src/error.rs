//! Error types for blockpatch-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the replacement engine
    #[error(transparent)]
    Engine(#[from] blockpatch_engine::Error),

    /// Error from the storage layer
    #[error(transparent)]
    Fs(#[from] blockpatch_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed plan file
    #[error("Invalid plan {path}: {message}")]
    Plan { path: PathBuf, message: String },

    /// Malformed plan step
    #[error("Invalid step '{step}': {message}")]
    PlanStep { step: String, message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a plan error for the given plan path
    pub fn plan(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Plan {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a plan error naming the offending step
    pub fn plan_step(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PlanStep {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
