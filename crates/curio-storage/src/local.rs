use crate::traits::{StorageError, StorageResult};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Local filesystem backend rooted at the upload directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    upload_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Path of a stored filename inside the upload directory.
    ///
    /// Rejects anything that is not a single plain path component, so a
    /// filename read back from the database can never escape the directory.
    pub fn path_for(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty() {
            return Err(StorageError::InvalidKey("Filename is empty".to_string()));
        }

        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(StorageError::InvalidKey(
                    "Filename resolves outside the upload directory".to_string(),
                ))
            }
        }

        Ok(self.upload_dir.join(filename))
    }

    /// Where the bytes of a deleted local video live: its recorded path, or
    /// the upload directory plus its filename when no path was recorded
    pub fn deleted_video_path(&self, storage_path: &str, filename: &str) -> StorageResult<PathBuf> {
        if storage_path.trim().is_empty() {
            self.path_for(filename)
        } else {
            Ok(PathBuf::from(storage_path))
        }
    }

    /// Unlink a file. A file that is already gone counts as removed.
    pub async fn remove(&self, path: &Path) -> StorageResult<()> {
        let start = std::time::Instant::now();

        match fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Local file already absent");
                return Ok(());
            }
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )))
            }
        }

        tracing::info!(
            path = %path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }
}
