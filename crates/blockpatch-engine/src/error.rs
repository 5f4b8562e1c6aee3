//! Error types for blockpatch-engine

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building patterns or running a pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No block matched the pattern for required step '{step}'")]
    PatternNotFound { step: String },

    #[error("Step '{step}' requires exactly one match, found {count}")]
    AmbiguousMatch { step: String, count: usize },

    #[error("Invalid pattern: {message}")]
    InvalidPattern { message: String },
}

impl Error {
    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            message: message.into(),
        }
    }
}
