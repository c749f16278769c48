//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use curio_core::models;

/// Registers the bearer scheme referenced by `security(("bearer_auth" = []))`
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Curio API",
        version = "0.1.0",
        description = "Video asset storage for the research content hierarchy. Videos are attached to subtopics and stored locally or on a remote media host."
    ),
    paths(
        // Auth
        handlers::auth::login,
        // Videos
        handlers::video_upload::upload_video,
        handlers::video_get::list_videos,
        handlers::video_get::list_subtopic_videos,
        handlers::video_get::get_video,
        handlers::video_update::update_video,
        handlers::video_delete::delete_video,
    ),
    components(
        schemas(
            models::VideoResponse,
            models::UserResponse,
            handlers::video_upload::VideoEnvelope,
            handlers::video_get::VideoListResponse,
            handlers::video_get::SubtopicVideosResponse,
            handlers::video_update::UpdateVideoRequest,
            handlers::video_delete::DeleteVideoResponse,
            handlers::auth::LoginRequest,
            handlers::auth::LoginResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "videos", description = "Video upload, listing, reassignment and deletion"),
        (name = "auth", description = "Sign-in and token issuing")
    )
)]
pub struct ApiDoc;
