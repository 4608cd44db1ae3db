//! Error types for roster loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for roster loading.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while loading the roster.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be decoded.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{url} answered {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// A roster file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path of the roster file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A roster file is not a JSON array of students.
    #[error("malformed roster: {0}")]
    Json(#[from] serde_json::Error),
}
