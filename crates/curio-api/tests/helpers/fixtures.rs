//! Test fixtures: video blobs and an in-memory video recorder.

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use chrono::{DateTime, Duration, Utc};
use curio_core::models::{DeletedVideo, NewVideo, PageRequest, Video, VideoPage};
use curio_core::AppError;
use curio_db::VideoRecorder;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Subtopics that exist in every test app
pub const KNOWN_SUBTOPICS: &[&str] = &["intro-to-rust", "ownership", "async-io"];

/// A few bytes that look like the start of an MP4 file
pub fn sample_video_bytes() -> Vec<u8> {
    let mut bytes = vec![0x00, 0x00, 0x00, 0x18];
    bytes.extend_from_slice(b"ftypmp42");
    bytes.extend_from_slice(&[0u8; 500]);
    bytes
}

pub fn video_part(bytes: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_type("video/mp4")
}

/// Multipart body with both fields set
pub fn upload_form(subtopic_id: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("subtopicId", subtopic_id.to_string())
        .add_part("video", video_part(sample_video_bytes(), "lecture.mp4"))
}

/// Rows kept in memory, with subtopic references checked like the real schema
pub struct InMemoryVideos {
    rows: Mutex<Vec<Video>>,
    subtopics: HashSet<String>,
    clock: Mutex<DateTime<Utc>>,
    fail_records: AtomicBool,
}

impl InMemoryVideos {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            subtopics: KNOWN_SUBTOPICS.iter().map(|s| s.to_string()).collect(),
            clock: Mutex::new(Utc::now() - Duration::hours(1)),
            fail_records: AtomicBool::new(false),
        }
    }

    /// Make every following `record` fail with a database-style error
    pub fn fail_records(&self, fail: bool) {
        self.fail_records.store(fail, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Video> {
        self.rows.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Strictly increasing timestamps so ordering is deterministic
    fn next_timestamp(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock().unwrap();
        *clock += Duration::milliseconds(10);
        *clock
    }

    fn newest_first(mut videos: Vec<Video>) -> Vec<Video> {
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        videos
    }
}

#[async_trait]
impl VideoRecorder for InMemoryVideos {
    async fn record(&self, video: NewVideo) -> Result<Video, AppError> {
        if self.fail_records.load(Ordering::SeqCst) {
            return Err(AppError::Internal("connection reset".to_string()));
        }
        if !self.subtopics.contains(&video.subtopic_id) {
            return Err(AppError::InvalidReference("Subtopic not found".to_string()));
        }

        let row = Video {
            id: Uuid::new_v4(),
            subtopic_id: video.subtopic_id,
            user_id: video.user_id,
            original_name: video.original_name,
            filename: video.filename,
            mime_type: video.mime_type,
            size_bytes: video.size_bytes,
            storage_path: video.storage_path,
            created_at: self.next_timestamp(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list(
        &self,
        subtopic_id: Option<&str>,
        page: PageRequest,
    ) -> Result<VideoPage, AppError> {
        let matching: Vec<Video> = self
            .all()
            .into_iter()
            .filter(|v| subtopic_id.map_or(true, |id| v.subtopic_id == id))
            .collect();
        let total = matching.len() as i64;
        let videos = Self::newest_first(matching)
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok(VideoPage { videos, total })
    }

    async fn list_for_subtopic(&self, subtopic_id: &str) -> Result<Vec<Video>, AppError> {
        let matching = self
            .all()
            .into_iter()
            .filter(|v| v.subtopic_id == subtopic_id)
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.all().into_iter().find(|v| v.id == id))
    }

    async fn reassign_subtopic(
        &self,
        id: Uuid,
        owner_id: Uuid,
        subtopic_id: &str,
    ) -> Result<Option<Video>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows
            .iter_mut()
            .find(|v| v.id == id && v.user_id == owner_id)
        else {
            return Ok(None);
        };
        if !self.subtopics.contains(subtopic_id) {
            return Err(AppError::InvalidReference("Subtopic not found".to_string()));
        }
        row.subtopic_id = subtopic_id.to_string();
        Ok(Some(row.clone()))
    }

    async fn delete_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<DeletedVideo>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(index) = rows
            .iter()
            .position(|v| v.id == id && v.user_id == owner_id)
        else {
            return Ok(None);
        };
        let row = rows.remove(index);
        Ok(Some(DeletedVideo {
            id: row.id,
            filename: row.filename,
            storage_path: row.storage_path,
        }))
    }
}
