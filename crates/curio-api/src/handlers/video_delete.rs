use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use curio_core::AppError;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteVideoResponse {
    pub success: bool,
}

/// Remove the record, then release the stored bytes.
///
/// Local files are unlinked before responding; remote objects are destroyed in
/// the background. Neither failure restores the row.
#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video deleted", body = DeleteVideoResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state),
    fields(user_id = %user.user_id, video_id = %id, operation = "delete_video")
)]
pub async fn delete_video(
    user: AuthUser,
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state
        .db
        .videos
        .delete_owned(id, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    // Detached for remote assets; the handle is not awaited.
    let _ = state.media.cleanup.release_deleted(&deleted).await;

    tracing::info!(video_id = %deleted.id, backend = %deleted.storage_backend(), "Video deleted");

    Ok(Json(DeleteVideoResponse { success: true }))
}
