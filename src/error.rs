//! Error type shared by the editor, the snapshot store and the handlers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("Unknown field: {0} (expected html, css or js)")]
    UnknownField(String),
    #[error("Snapshot name must not be empty")]
    EmptySnapshotName,
    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Snapshot index is corrupt: {0}")]
    CorruptIndex(String),
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
