//! Cloudinary upload API client
//!
//! Requests are signed with SHA-256: the signed parameters are sorted by name,
//! joined as `key=value&...`, suffixed with the API secret and hashed to hex.

use crate::remote::{RemoteMediaClient, RemoteResourceType, RemoteUpload, RemoteUploadOptions};
use crate::traits::{StorageError, StorageResult};
use async_trait::async_trait;
use curio_core::RemoteMediaConfig;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio_util::io::ReaderStream;

const SIGNATURE_ALGORITHM: &str = "sha256";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: Client,
    config: RemoteMediaConfig,
}

impl CloudinaryClient {
    pub fn new(config: RemoteMediaConfig) -> StorageResult<Self> {
        let http = Client::builder().build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create HTTP client for Cloudinary: {}", e))
        })?;

        Ok(Self { http, config })
    }

    fn endpoint(&self, resource_type: RemoteResourceType, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.cloud_name,
            resource_type.as_str(),
            action
        )
    }

    /// Signed parameter set shared by upload and destroy
    fn signed_params(&self, public_id: &str) -> Vec<(&'static str, String)> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        vec![
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.config.api_key.clone()),
            ("signature", signature),
            ("signature_algorithm", SIGNATURE_ALGORITHM.to_string()),
        ]
    }
}

/// Hex SHA-256 of the sorted `key=value` pairs followed by the secret
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

async fn backend_error(action: &str, response: reqwest::Response) -> StorageError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body
            }
        });

    StorageError::BackendError(format!("Cloudinary {} failed ({}): {}", action, status, message))
}

#[async_trait]
impl RemoteMediaClient for CloudinaryClient {
    async fn upload(
        &self,
        local_path: &Path,
        options: &RemoteUploadOptions,
    ) -> StorageResult<RemoteUpload> {
        let start = std::time::Instant::now();

        let file = tokio::fs::File::open(local_path).await?;
        let length = file.metadata().await?.len();
        let file_name = local_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length)
            .file_name(file_name);

        let mut form = Form::new().part("file", part);
        for (key, value) in self.signed_params(&options.public_id) {
            form = form.text(key, value);
        }

        let response = self
            .http
            .post(self.endpoint(options.resource_type, "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Cloudinary upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(backend_error("upload", response).await);
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            StorageError::BackendError(format!("Failed to parse Cloudinary upload response: {}", e))
        })?;

        let url = body.secure_url.filter(|url| !url.is_empty()).ok_or_else(|| {
            StorageError::BackendError("Cloudinary upload response has no secure_url".to_string())
        })?;

        tracing::info!(
            public_id = %options.public_id,
            size_bytes = body.bytes.unwrap_or(length),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cloudinary upload successful"
        );

        Ok(RemoteUpload {
            url,
            public_id: body.public_id,
            bytes: body.bytes,
        })
    }

    async fn destroy(&self, public_id: &str, resource_type: RemoteResourceType) -> StorageResult<()> {
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(self.endpoint(resource_type, "destroy"))
            .form(&self.signed_params(public_id))
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(format!("Cloudinary destroy request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(backend_error("destroy", response).await);
        }

        let result = response
            .json::<DestroyResponse>()
            .await
            .ok()
            .and_then(|body| body.result)
            .unwrap_or_default();

        tracing::info!(
            public_id = %public_id,
            result = %result,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cloudinary destroy completed"
        );

        Ok(())
    }
}
