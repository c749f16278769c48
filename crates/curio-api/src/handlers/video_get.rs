use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::video_upload::VideoEnvelope;
use crate::state::AppState;
use crate::utils::base_url::request_base_url;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use curio_core::models::{PageRequest, Video, VideoResponse};
use curio_core::{AppError, UrlContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Raw listing parameters; unparsable values fall back to defaults
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "subtopicId")]
    pub subtopic_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoListResponse {
    pub videos: Vec<VideoResponse>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubtopicVideosResponse {
    pub videos: Vec<VideoResponse>,
}

fn to_responses(state: &AppState, headers: &HeaderMap, videos: Vec<Video>) -> Vec<VideoResponse> {
    let base_url = request_base_url(&state.config, headers);
    let ctx = UrlContext::new(&base_url, state.config.remote_cloud_name());
    videos
        .into_iter()
        .map(|video| VideoResponse::from_video(video, &ctx))
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of videos, newest first", body = VideoListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, headers, params),
    fields(user_id = %user.user_id, subtopic_id = ?params.subtopic_id, operation = "list_videos")
)]
pub async fn list_videos(
    user: AuthUser,
    Query(params): Query<ListQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    let subtopic_id = params
        .subtopic_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let result = state.db.videos.list(subtopic_id, page).await?;

    Ok(Json(VideoListResponse {
        videos: to_responses(&state, &headers, result.videos),
        page: page.page,
        limit: page.limit,
        total: result.total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/videos/subtopic/{subtopicId}",
    tag = "videos",
    params(
        ("subtopicId" = String, Path, description = "Subtopic slug")
    ),
    responses(
        (status = 200, description = "Every video of the subtopic, newest first", body = SubtopicVideosResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers), fields(operation = "list_subtopic_videos"))]
pub async fn list_subtopic_videos(
    Path(subtopic_id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.db.videos.list_for_subtopic(&subtopic_id).await?;

    Ok(Json(SubtopicVideosResponse {
        videos: to_responses(&state, &headers, videos),
    }))
}

#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = VideoEnvelope),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, headers),
    fields(user_id = %user.user_id, video_id = %id, operation = "get_video")
)]
pub async fn get_video(
    user: AuthUser,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .db
        .videos
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let base_url = request_base_url(&state.config, &headers);
    let ctx = UrlContext::new(&base_url, state.config.remote_cloud_name());

    Ok(Json(VideoEnvelope {
        video: VideoResponse::from_video(video, &ctx),
    }))
}
