//! Recording stand-in for the remote media service.

use async_trait::async_trait;
use curio_storage::{
    RemoteMediaClient, RemoteResourceType, RemoteUpload, RemoteUploadOptions, StorageError,
    StorageResult,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub const REMOTE_DELIVERY_PREFIX: &str = "https://res.cloudinary.com/curio-test/video/upload";

#[derive(Default)]
pub struct RecordingRemoteClient {
    fail_uploads: AtomicBool,
    uploads: Mutex<Vec<(String, u64)>>,
    destroyed: Mutex<Vec<String>>,
}

impl RecordingRemoteClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// `(public_id, bytes read from the staged file)` per upload
    pub fn uploads(&self) -> Vec<(String, u64)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteMediaClient for RecordingRemoteClient {
    async fn upload(
        &self,
        local_path: &Path,
        options: &RemoteUploadOptions,
    ) -> StorageResult<RemoteUpload> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "Remote media service unavailable".to_string(),
            ));
        }

        let bytes = tokio::fs::read(local_path).await?;
        let size = bytes.len() as u64;
        self.uploads
            .lock()
            .unwrap()
            .push((options.public_id.clone(), size));

        Ok(RemoteUpload {
            url: format!("{}/v1/{}.mp4", REMOTE_DELIVERY_PREFIX, options.public_id),
            public_id: Some(options.public_id.clone()),
            bytes: Some(size),
        })
    }

    async fn destroy(&self, public_id: &str, resource_type: RemoteResourceType) -> StorageResult<()> {
        assert_eq!(resource_type, RemoteResourceType::Video);
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}
