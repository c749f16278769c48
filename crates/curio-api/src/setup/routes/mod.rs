//! Route configuration and setup.

mod health;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::auth::token::TokenVerifier;
use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::error::{hide_error_details, size_limit_message, HttpAppError};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use curio_core::{AppError, Config};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the complete router for `state`
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    hide_error_details(config.is_production());

    let auth_state = AuthState {
        verifier: TokenVerifier::new(config.jwt_secret()),
    };

    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        Arc::new(auth_state),
        auth_middleware,
    ));

    let body_limit = config
        .max_video_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let app = public_routes()
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(config.upload_dir()))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(axum::middleware::map_response_with_state(
            size_limit_message(config.max_video_size_bytes()),
            payload_too_large_as_json,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Re-render the body limit layer's plain-text 413 as the JSON error body
async fn payload_too_large_as_json(State(message): State<String>, response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    HttpAppError(AppError::PayloadTooLarge(message)).into_response()
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .route(
            &format!("{}/auth/login", API_PREFIX),
            post(handlers::auth::login),
        )
        .route(
            &format!("{}/videos/subtopic/{{subtopic_id}}", API_PREFIX),
            get(handlers::video_get::list_subtopic_videos),
        )
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/videos", API_PREFIX),
            post(handlers::video_upload::upload_video).get(handlers::video_get::list_videos),
        )
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            get(handlers::video_get::get_video)
                .patch(handlers::video_update::update_video)
                .delete(handlers::video_delete::delete_video),
        )
}
