//! History error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing a user's history.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed history file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
