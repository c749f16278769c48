//! Video upload pipeline
//!
//! receive → stage → store → record → release staged bytes
//!
//! Failures after staging schedule removal of the staged file and never retry.
//! A failed record after a remote upload leaves the remote object in place.

use std::sync::Arc;

use axum::extract::Multipart;
use curio_core::models::{NewVideo, Video};
use curio_core::AppError;
use curio_storage::{StagedFile, StorageBackend};
use uuid::Uuid;

use crate::error::{multipart_error, HttpAppError};
use crate::state::AppState;

const VIDEO_FIELD: &str = "video";
const SUBTOPIC_FIELD: &str = "subtopicId";

/// Fields collected from the multipart body
#[derive(Debug, Default)]
struct UploadForm {
    subtopic_id: Option<String>,
    staged: Option<StagedFile>,
}

pub struct VideoUploadService {
    state: Arc<AppState>,
}

impl VideoUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Run the whole pipeline for one request and return the recorded video
    pub async fn upload(&self, owner_id: Uuid, multipart: Multipart) -> Result<Video, HttpAppError> {
        let form = self.read_form(multipart).await?;

        let subtopic_id = match form.subtopic_id {
            Some(subtopic_id) => subtopic_id,
            None => {
                if let Some(staged) = form.staged {
                    self.state.media.cleanup.discard_staged(staged.path);
                }
                return Err(AppError::InvalidInput("subtopicId is required".to_string()).into());
            }
        };
        let staged = form
            .staged
            .ok_or_else(|| AppError::InvalidInput("video file is required".to_string()))?;

        let stored = match self
            .state
            .media
            .storage
            .store(&staged, self.state.config.remote_video_folder())
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    filename = %staged.filename,
                    backend = %self.state.media.storage.kind(),
                    "Failed to store staged video"
                );
                self.state.media.cleanup.discard_staged(staged.path.clone());
                return Err(e.into());
            }
        };

        let new_video = NewVideo {
            subtopic_id,
            user_id: owner_id,
            original_name: staged.original_name.clone(),
            filename: stored.stored_identifier.clone(),
            mime_type: staged.mime_type.clone(),
            size_bytes: i64::try_from(stored.size_bytes).unwrap_or(i64::MAX),
            storage_path: stored.location.clone(),
        };

        let video = match self.state.db.videos.record(new_video).await {
            Ok(video) => video,
            Err(e) => {
                if stored.backend == StorageBackend::Remote {
                    tracing::warn!(
                        public_id = %stored.stored_identifier,
                        location = %stored.location,
                        "Video record failed after remote upload; remote object left orphaned"
                    );
                }
                self.state.media.cleanup.discard_staged(staged.path.clone());
                return Err(e.into());
            }
        };

        if stored.backend == StorageBackend::Remote {
            self.state.media.cleanup.release_staged(&staged.path).await;
        }

        tracing::info!(
            video_id = %video.id,
            subtopic_id = %video.subtopic_id,
            backend = %stored.backend,
            size_bytes = stored.size_bytes,
            "Video uploaded"
        );

        Ok(video)
    }

    /// Collect the form fields, staging the video as it streams in.
    ///
    /// On error any file staged so far is discarded.
    async fn read_form(&self, mut multipart: Multipart) -> Result<UploadForm, HttpAppError> {
        let mut form = UploadForm::default();

        if let Err(e) = self.collect_fields(&mut multipart, &mut form).await {
            if let Some(staged) = form.staged.take() {
                self.state.media.cleanup.discard_staged(staged.path);
            }
            return Err(e);
        }

        Ok(form)
    }

    async fn collect_fields(
        &self,
        multipart: &mut Multipart,
        form: &mut UploadForm,
    ) -> Result<(), HttpAppError> {
        let staging = &self.state.media.staging;
        let limit_bytes = staging.max_bytes();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, limit_bytes))?
        {
            let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

            match field_name.as_str() {
                SUBTOPIC_FIELD => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, limit_bytes))?;
                    let value = value.trim();
                    form.subtopic_id = (!value.is_empty()).then(|| value.to_string());
                }
                VIDEO_FIELD => {
                    if form.staged.is_some() {
                        return Err(AppError::InvalidInput(
                            "Only one video file may be uploaded per request".to_string(),
                        )
                        .into());
                    }
                    let file_name = field.file_name().map(|s| s.to_string());
                    let content_type = field.content_type().map(|s| s.to_string());

                    let staged = staging
                        .receive(field, file_name.as_deref(), content_type.as_deref())
                        .await?;
                    form.staged = Some(staged);
                }
                other => {
                    tracing::debug!(field = %other, "Ignoring unknown multipart field");
                }
            }
        }

        Ok(())
    }
}
