//! Upload staging area
//!
//! Incoming file streams are written to the upload directory under a
//! collision-free name before any backend decision is applied. The size ceiling
//! is enforced while streaming, so an oversized upload never lands on disk in full.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Instant;

use bytes::Bytes;
use curio_core::constants::{DEFAULT_VIDEO_EXTENSION, MAX_EXTENSION_LEN};
use futures::{Stream, StreamExt};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Upload exceeds the limit of {limit_bytes} bytes")]
    TooLarge { limit_bytes: u64 },

    #[error("Failed to read upload stream: {0}")]
    Stream(String),

    #[error("Failed to write staged file: {0}")]
    Io(#[from] std::io::Error),
}

/// A fully written, synced upload waiting for its backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub original_name: String,
}

#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
    max_bytes: u64,
}

impl StagingArea {
    /// Create the staging area, making sure its directory exists.
    ///
    /// A relative directory is resolved against the working directory once, so
    /// staged paths stay valid if the process later runs from elsewhere.
    pub async fn new(dir: impl Into<PathBuf>, max_bytes: u64) -> StorageResult<Self> {
        let dir = std::path::absolute(dir.into()).map_err(|e| {
            StorageError::ConfigError(format!("Failed to resolve upload directory: {}", e))
        })?;

        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self { dir, max_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Write `stream` to a new staged file.
    ///
    /// On any error the partially written file is removed before returning.
    pub async fn receive<S, E>(
        &self,
        stream: S,
        original_name: Option<&str>,
        mime_type: Option<&str>,
    ) -> Result<StagedFile, StagingError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let filename = staging_filename(original_name);
        let path = self.dir.join(&filename);
        let start = Instant::now();

        let mut file = fs::File::create(&path).await?;
        let size_bytes = match self.copy_limited(&mut file, stream).await {
            Ok(size) => size,
            Err(e) => {
                drop(file);
                discard_partial(&path).await;
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "Discarded partial staged upload"
                );
                return Err(e);
            }
        };

        tracing::info!(
            path = %path.display(),
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload staged"
        );

        let original_name = original_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .unwrap_or_else(|| filename.clone());
        let mime_type = mime_type
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();

        Ok(StagedFile {
            path,
            filename,
            size_bytes,
            mime_type,
            original_name,
        })
    }

    async fn copy_limited<S, E>(&self, file: &mut fs::File, stream: S) -> Result<u64, StagingError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let mut stream = std::pin::pin!(stream);
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| StagingError::Stream(e.to_string()))?;
            written = match written.checked_add(chunk.len() as u64) {
                Some(total) if total <= self.max_bytes => total,
                _ => {
                    return Err(StagingError::TooLarge {
                        limit_bytes: self.max_bytes,
                    })
                }
            };
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }
}

/// `<uuid><ext>`, keeping a short alphanumeric extension from the client's name
pub fn staging_filename(original_name: Option<&str>) -> String {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| DEFAULT_VIDEO_EXTENSION.to_string());

    format!("{}{}", Uuid::new_v4(), extension)
}

async fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove partial staged upload"
            );
        }
    }
}
