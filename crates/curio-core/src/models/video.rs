use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::storage_types::StorageBackend;
use crate::urls::{resolve_video_urls, UrlContext};

/// Persisted video asset
///
/// `filename` is the backend-specific stored identifier: the on-disk filename for
/// local storage, the public id for remote storage. `storage_path` holds either the
/// local filesystem path or the remote URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub subtopic_id: String,
    pub user_id: Uuid,
    pub original_name: String,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
}

impl Video {
    pub fn storage_backend(&self) -> StorageBackend {
        StorageBackend::classify(&self.storage_path)
    }
}

/// Values for a new row, gathered once the bytes are durably stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub subtopic_id: String,
    pub user_id: Uuid,
    pub original_name: String,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_path: String,
}

/// What is left to clean up after a row has been deleted
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DeletedVideo {
    pub id: Uuid,
    pub filename: String,
    pub storage_path: String,
}

impl DeletedVideo {
    pub fn storage_backend(&self) -> StorageBackend {
        StorageBackend::classify(&self.storage_path)
    }
}

/// One page of a listing together with the unpaginated total
#[derive(Debug, Clone, Default)]
pub struct VideoPage {
    pub videos: Vec<Video>,
    pub total: i64,
}

/// Video response DTO with resolved links
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub subtopic_id: String,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
    pub url: String,
    /// Empty for locally stored videos
    pub thumbnail_url: String,
}

impl VideoResponse {
    pub fn from_video(video: Video, ctx: &UrlContext<'_>) -> Self {
        let urls = resolve_video_urls(&video, ctx);
        Self {
            id: video.id,
            subtopic_id: video.subtopic_id,
            filename: video.filename,
            original_name: video.original_name,
            mime_type: video.mime_type,
            size_bytes: video.size_bytes,
            created_at: video.created_at,
            url: urls.url,
            thumbnail_url: urls.thumbnail_url,
        }
    }
}
