use crate::auth::token::issue_token;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use curio_core::models::UserResponse;
use curio_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Email and password are required", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let email = request
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    let password = request.password.filter(|p| !p.is_empty());

    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::InvalidInput("Email and password are required".to_string()).into());
    };

    let user = state
        .db
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?;

    match verified {
        Ok(true) => {}
        Ok(false) => return Err(invalid_credentials().into()),
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
            return Err(invalid_credentials().into());
        }
    }

    let token = issue_token(&state.config, user.id, &user.email)?;
    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Json(LoginResponse {
        user: UserResponse::from(user),
        token,
    }))
}
