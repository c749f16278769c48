//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors
//! (`AppError`, `StorageError`, `StagingError`) convert into `HttpAppError`, which
//! renders the shared `ErrorResponse` body and logs at the error's level.

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use curio_core::{AppError, ErrorMetadata, LogLevel};
use curio_storage::{StagingError, StorageError};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use utoipa::ToSchema;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: AppError lives in curio-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

/// Client-facing wording for an exceeded upload ceiling
pub fn size_limit_message(limit_bytes: u64) -> String {
    if limit_bytes >= BYTES_PER_MB {
        format!("Video exceeds {}MB limit", limit_bytes / BYTES_PER_MB)
    } else {
        format!("Video exceeds {} byte limit", limit_bytes)
    }
}

/// Map a multipart parsing failure, keeping body-limit rejections as 413
pub fn multipart_error(err: MultipartError, limit_bytes: u64) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(size_limit_message(limit_bytes))
    } else {
        AppError::InvalidInput(format!("Failed to read multipart body: {}", err.body_text()))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::Storage(msg),
            StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<StagingError> for HttpAppError {
    fn from(err: StagingError) -> Self {
        let app = match err {
            StagingError::TooLarge { limit_bytes } => {
                AppError::PayloadTooLarge(size_limit_message(limit_bytes))
            }
            StagingError::Stream(msg) => {
                AppError::InvalidInput(format!("Failed to read video upload: {}", msg))
            }
            StagingError::Io(err) => AppError::Storage(format!("Failed to stage upload: {}", err)),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

static HIDE_ERROR_DETAILS: AtomicBool = AtomicBool::new(false);

/// Stop rendering `details` and `error_type` in error bodies.
///
/// Set once while building the router, from `Config::is_production()`.
pub fn hide_error_details(hide: bool) {
    HIDE_ERROR_DETAILS.store(hide, Ordering::Relaxed);
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let show_details =
            !HIDE_ERROR_DETAILS.load(Ordering::Relaxed) && !app_error.is_sensitive();
        let body = ErrorResponse {
            error: app_error.client_message(),
            details: show_details.then(|| app_error.detailed_message()),
            error_type: show_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_backend() {
        let HttpAppError(app_err) = StorageError::BackendError("quota".to_string()).into();
        match app_err {
            AppError::Storage(msg) => assert_eq!(msg, "quota"),
            other => panic!("Expected Storage variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_storage_error_invalid_key() {
        let HttpAppError(app_err) = StorageError::InvalidKey("bad".to_string()).into();
        assert!(matches!(app_err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_from_staging_error_too_large() {
        let HttpAppError(app_err) = StagingError::TooLarge {
            limit_bytes: 500 * 1024 * 1024,
        }
        .into();
        match app_err {
            AppError::PayloadTooLarge(msg) => assert_eq!(msg, "Video exceeds 500MB limit"),
            other => panic!("Expected PayloadTooLarge variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_staging_error_stream() {
        let HttpAppError(app_err) = StagingError::Stream("reset".to_string()).into();
        assert!(matches!(app_err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_size_limit_message_below_one_megabyte() {
        assert_eq!(size_limit_message(2048), "Video exceeds 2048 byte limit");
        assert_eq!(size_limit_message(3 * 1024 * 1024), "Video exceeds 3MB limit");
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Video not found".to_string(),
            details: None,
            error_type: None,
            code: "NOT_FOUND".to_string(),
            recoverable: false,
            suggested_action: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["error"], "Video not found");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["recoverable"], false);
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_hidden_details_are_left_out_of_the_body() {
        let render = || async {
            let response =
                HttpAppError(AppError::InvalidInput("subtopicId is required".to_string()))
                    .into_response();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            serde_json::from_slice::<serde_json::Value>(&bytes).unwrap()
        };

        hide_error_details(true);
        let hidden = render().await;
        hide_error_details(false);
        let shown = render().await;

        assert_eq!(hidden["code"], shown["code"]);
        assert!(hidden.get("details").is_none());
        assert!(hidden.get("error_type").is_none());
        assert!(shown.get("details").is_some());
    }
}
