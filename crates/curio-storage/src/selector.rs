use crate::cloudinary::CloudinaryClient;
use crate::remote::{RemoteMediaClient, RemoteResourceType, RemoteUploadOptions};
use crate::staging::StagedFile;
use crate::traits::{StorageResult, StoredVideo};
use crate::StorageBackend;
use curio_core::{Config, VideoBackend};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
enum Backend {
    Local,
    Remote { client: Arc<dyn RemoteMediaClient> },
}

/// Applies the backend chosen at startup to staged uploads
#[derive(Clone)]
pub struct VideoStorage {
    backend: Backend,
}

impl std::fmt::Debug for VideoStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoStorage")
            .field("backend", &self.kind())
            .finish()
    }
}

impl VideoStorage {
    pub fn local() -> Self {
        Self {
            backend: Backend::Local,
        }
    }

    pub fn remote(client: Arc<dyn RemoteMediaClient>) -> Self {
        Self {
            backend: Backend::Remote { client },
        }
    }

    pub fn kind(&self) -> StorageBackend {
        match self.backend {
            Backend::Local => StorageBackend::Local,
            Backend::Remote { .. } => StorageBackend::Remote,
        }
    }

    pub fn remote_client(&self) -> Option<Arc<dyn RemoteMediaClient>> {
        match &self.backend {
            Backend::Local => None,
            Backend::Remote { client } => Some(client.clone()),
        }
    }

    /// Store a staged upload on the active backend.
    ///
    /// The staged file is left in place on every outcome; removing it is the
    /// caller's job.
    pub async fn store(&self, staged: &StagedFile, folder_hint: &str) -> StorageResult<StoredVideo> {
        match &self.backend {
            Backend::Local => Ok(StoredVideo {
                backend: StorageBackend::Local,
                location: staged.path.to_string_lossy().into_owned(),
                stored_identifier: staged.filename.clone(),
                size_bytes: staged.size_bytes,
            }),
            Backend::Remote { client } => {
                let options = RemoteUploadOptions {
                    public_id: remote_public_id(folder_hint),
                    resource_type: RemoteResourceType::Video,
                };

                let uploaded = client.upload(&staged.path, &options).await?;

                Ok(StoredVideo {
                    backend: StorageBackend::Remote,
                    location: uploaded.url,
                    stored_identifier: uploaded
                        .public_id
                        .filter(|id| !id.is_empty())
                        .unwrap_or(options.public_id),
                    size_bytes: uploaded.bytes.unwrap_or(staged.size_bytes),
                })
            }
        }
    }
}

/// `<folder>/<uuid>`, or just the uuid when no folder is given
fn remote_public_id(folder_hint: &str) -> String {
    let folder = folder_hint.trim().trim_matches('/');
    if folder.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        format!("{}/{}", folder, Uuid::new_v4())
    }
}

/// Build the storage selector from the backend resolved in configuration
pub fn create_video_storage(config: &Config) -> StorageResult<VideoStorage> {
    match config.video_backend() {
        VideoBackend::Local => Ok(VideoStorage::local()),
        VideoBackend::Remote(remote) => {
            let client = CloudinaryClient::new(remote.clone())?;
            Ok(VideoStorage::remote(Arc::new(client)))
        }
    }
}
