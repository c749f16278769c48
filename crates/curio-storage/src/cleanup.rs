//! Byte removal after failures and deletions
//!
//! Nothing here reports failure to the caller. Every error is logged and
//! swallowed, and no removal is ever retried.

use crate::local::LocalStorage;
use crate::remote::{RemoteMediaClient, RemoteResourceType};
use crate::StorageBackend;
use curio_core::models::DeletedVideo;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct CleanupCoordinator {
    local: LocalStorage,
    remote: Option<Arc<dyn RemoteMediaClient>>,
}

impl CleanupCoordinator {
    pub fn new(local: LocalStorage, remote: Option<Arc<dyn RemoteMediaClient>>) -> Self {
        Self { local, remote }
    }

    /// Remove a staged file whose bytes now live elsewhere. Awaited by the caller.
    pub async fn release_staged(&self, path: &Path) {
        if let Err(e) = self.local.remove(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove staged upload"
            );
        }
    }

    /// Schedule removal of a staged file after a failed upload pipeline
    pub fn discard_staged(&self, path: PathBuf) -> JoinHandle<()> {
        let local = self.local.clone();
        tokio::spawn(async move {
            if let Err(e) = local.remove(&path).await {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to discard staged upload"
                );
            }
        })
    }

    /// Remove the bytes of a video whose row is already gone.
    ///
    /// Local files are unlinked before this returns. Remote objects are
    /// destroyed on a detached task, whose handle is returned.
    pub async fn release_deleted(&self, deleted: &DeletedVideo) -> Option<JoinHandle<()>> {
        match deleted.storage_backend() {
            StorageBackend::Remote => self.destroy_remote(deleted),
            StorageBackend::Local => {
                self.remove_local(deleted).await;
                None
            }
        }
    }

    fn destroy_remote(&self, deleted: &DeletedVideo) -> Option<JoinHandle<()>> {
        let Some(client) = self.remote.clone() else {
            tracing::warn!(
                video_id = %deleted.id,
                public_id = %deleted.filename,
                "Remote video deleted but no remote media client is configured"
            );
            return None;
        };

        let public_id = deleted.filename.clone();
        let video_id = deleted.id;
        Some(tokio::spawn(async move {
            if let Err(e) = client.destroy(&public_id, RemoteResourceType::Video).await {
                tracing::warn!(
                    video_id = %video_id,
                    public_id = %public_id,
                    error = %e,
                    "Failed to destroy remote video"
                );
            }
        }))
    }

    async fn remove_local(&self, deleted: &DeletedVideo) {
        let path = match self
            .local
            .deleted_video_path(&deleted.storage_path, &deleted.filename)
        {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    video_id = %deleted.id,
                    filename = %deleted.filename,
                    error = %e,
                    "Refusing to remove local video file"
                );
                return;
            }
        };

        if let Err(e) = self.local.remove(&path).await {
            tracing::warn!(
                video_id = %deleted.id,
                path = %path.display(),
                error = %e,
                "Failed to remove local video file"
            );
        }
    }
}
