use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::video_upload::VideoUploadService;
use crate::state::AppState;
use crate::utils::base_url::request_base_url;
use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use curio_core::models::VideoResponse;
use curio_core::UrlContext;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoEnvelope {
    pub video: VideoResponse,
}

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Fields `video` (file) and `subtopicId`"),
    responses(
        (status = 201, description = "Video uploaded", body = VideoEnvelope),
        (status = 400, description = "Missing field or unknown subtopic", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "Video exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, headers, multipart),
    fields(user_id = %user.user_id, operation = "upload_video")
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = VideoUploadService::new(&state)
        .upload(user.user_id, multipart)
        .await?;

    let base_url = request_base_url(&state.config, &headers);
    let ctx = UrlContext::new(&base_url, state.config.remote_cloud_name());

    Ok((
        StatusCode::CREATED,
        Json(VideoEnvelope {
            video: VideoResponse::from_video(video, &ctx),
        }),
    ))
}
