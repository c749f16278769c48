use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::video_upload::VideoEnvelope;
use crate::state::AppState;
use crate::utils::base_url::request_base_url;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use curio_core::models::VideoResponse;
use curio_core::{AppError, UrlContext};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub subtopic_id: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/videos/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video moved to the new subtopic", body = VideoEnvelope),
        (status = 400, description = "Missing subtopicId or unknown subtopic", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, headers, request),
    fields(user_id = %user.user_id, video_id = %id, operation = "update_video")
)]
pub async fn update_video(
    user: AuthUser,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UpdateVideoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let subtopic_id = request
        .subtopic_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidInput("subtopicId is required".to_string()))?;

    let video = state
        .db
        .videos
        .reassign_subtopic(id, user.user_id, subtopic_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    tracing::info!(video_id = %video.id, subtopic_id = %video.subtopic_id, "Video reassigned");

    let base_url = request_base_url(&state.config, &headers);
    let ctx = UrlContext::new(&base_url, state.config.remote_cloud_name());

    Ok(Json(VideoEnvelope {
        video: VideoResponse::from_video(video, &ctx),
    }))
}
