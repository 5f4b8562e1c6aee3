//! Error types for blockpatch-fs

use std::path::PathBuf;

/// Result type for blockpatch-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in blockpatch-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("File {path} is not valid UTF-8 text: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
