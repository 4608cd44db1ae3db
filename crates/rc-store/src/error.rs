//! Error types for the persistence adapter.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The backing data is not valid JSON for the expected shape.
    #[error("malformed store data: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value does not have the expected format.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// The entry name.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
}
