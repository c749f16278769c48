//! Remote media service abstraction
//!
//! The API talks to the managed media service only through [`RemoteMediaClient`],
//! so tests can substitute a recording fake for the real HTTP client.

use crate::traits::StorageResult;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Resource class the media service stores an object under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteResourceType {
    Video,
}

impl RemoteResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteResourceType::Video => "video",
        }
    }
}

impl fmt::Display for RemoteResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUploadOptions {
    pub public_id: String,
    pub resource_type: RemoteResourceType,
}

/// What the service reports for a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUpload {
    /// Durable HTTPS URL of the stored object
    pub url: String,
    pub public_id: Option<String>,
    pub bytes: Option<u64>,
}

#[async_trait]
pub trait RemoteMediaClient: Send + Sync {
    /// Upload the file at `local_path`, reading it from disk
    async fn upload(
        &self,
        local_path: &Path,
        options: &RemoteUploadOptions,
    ) -> StorageResult<RemoteUpload>;

    /// Delete a previously uploaded object by its public id
    async fn destroy(&self, public_id: &str, resource_type: RemoteResourceType) -> StorageResult<()>;
}
