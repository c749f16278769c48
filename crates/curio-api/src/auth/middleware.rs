use crate::auth::models::AuthUser;
use crate::auth::token::TokenVerifier;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use curio_core::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: TokenVerifier,
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return HttpAppError(AppError::Unauthorized("Missing auth token".to_string()))
            .into_response();
    };

    let claims = match auth_state.verifier.verify(token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    request.extensions_mut().insert(AuthUser::from(claims));
    next.run(request).await
}
