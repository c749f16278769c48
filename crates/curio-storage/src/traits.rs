//! Storage result and error types shared by both backends

use crate::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The remote media service rejected the request or answered unexpectedly
    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of storing a staged upload, identical in shape for both backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVideo {
    pub backend: StorageBackend,
    /// Filesystem path (local) or durable URL (remote)
    pub location: String,
    /// Generated filename (local) or public id (remote)
    pub stored_identifier: String,
    pub size_bytes: u64,
}
