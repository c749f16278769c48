//! Configuration module
//!
//! Process-wide settings are read once at startup into an explicit `Config` value
//! and passed by reference to the components that need them. Nothing downstream
//! reads the environment on its own.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_REMOTE_API_BASE_URL, DEFAULT_REMOTE_VIDEO_FOLDER, DEFAULT_UPLOAD_DIR,
    MAX_VIDEO_SIZE_MB,
};
use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24 * 7;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Base HTTP and database settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub environment: String,
}

/// Credentials and placement for the remote media service
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteMediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder prefix for generated public ids
    pub upload_folder: String,
    pub api_base_url: String,
}

impl fmt::Debug for RemoteMediaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteMediaConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("upload_folder", &self.upload_folder)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Where uploaded video bytes end up, resolved once at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoBackend {
    Local,
    Remote(RemoteMediaConfig),
}

impl VideoBackend {
    pub fn kind(&self) -> StorageBackend {
        match self {
            VideoBackend::Local => StorageBackend::Local,
            VideoBackend::Remote(_) => StorageBackend::Remote,
        }
    }
}

/// Video service configuration
#[derive(Clone, Debug)]
pub struct VideoServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    /// Overrides the request-derived base URL for local video links
    pub base_url: Option<String>,
    pub upload_dir: PathBuf,
    pub max_video_size_bytes: u64,
    pub video_backend: VideoBackend,
    /// Cloud name used for thumbnail links; may be set without full credentials
    pub remote_cloud_name: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<VideoServiceConfig>);

impl Config {
    fn as_video(&self) -> &VideoServiceConfig {
        &self.0
    }

    pub fn new(config: VideoServiceConfig) -> Self {
        Config(Box::new(config))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_video().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = VideoServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_video().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_video().base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_video().base.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.as_video().base.jwt_expiry_hours
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_video().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_video().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_video().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_video().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.as_video().database_url
    }

    pub fn base_url(&self) -> Option<&str> {
        self.as_video().base_url.as_deref()
    }

    pub fn upload_dir(&self) -> &std::path::Path {
        &self.as_video().upload_dir
    }

    pub fn max_video_size_bytes(&self) -> u64 {
        self.as_video().max_video_size_bytes
    }

    pub fn video_backend(&self) -> &VideoBackend {
        &self.as_video().video_backend
    }

    pub fn remote_cloud_name(&self) -> Option<&str> {
        self.as_video().remote_cloud_name.as_deref()
    }

    /// Folder hint for remote public ids
    pub fn remote_video_folder(&self) -> &str {
        match &self.as_video().video_backend {
            VideoBackend::Remote(remote) => &remote.upload_folder,
            VideoBackend::Local => DEFAULT_REMOTE_VIDEO_FOLDER,
        }
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

/// Treats empty and whitespace-only values as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl VideoServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS")
            .or_else(|| lookup("CORS_ORIGIN"))
            .unwrap_or_else(|| "*".to_string());

        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: lookup("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            environment,
        };

        let remote_cloud_name = non_empty(lookup("CLOUDINARY_CLOUD_NAME"));
        let remote_api_key = non_empty(lookup("CLOUDINARY_API_KEY"));
        let remote_api_secret = non_empty(lookup("CLOUDINARY_API_SECRET"));

        // Remote only when every credential is present
        let video_backend = match (&remote_cloud_name, remote_api_key, remote_api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => {
                VideoBackend::Remote(RemoteMediaConfig {
                    cloud_name: cloud_name.clone(),
                    api_key,
                    api_secret,
                    upload_folder: non_empty(lookup("CLOUDINARY_VIDEO_FOLDER"))
                        .map(|folder| folder.trim_matches('/').to_string())
                        .unwrap_or_else(|| DEFAULT_REMOTE_VIDEO_FOLDER.to_string()),
                    api_base_url: non_empty(lookup("CLOUDINARY_API_BASE_URL"))
                        .map(|url| url.trim_end_matches('/').to_string())
                        .unwrap_or_else(|| DEFAULT_REMOTE_API_BASE_URL.to_string()),
                })
            }
            _ => VideoBackend::Local,
        };

        let config = VideoServiceConfig {
            base,
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            base_url: non_empty(lookup("BASE_URL"))
                .map(|url| url.trim_end_matches('/').to_string()),
            upload_dir: PathBuf::from(
                non_empty(lookup("UPLOAD_DIR")).unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            max_video_size_bytes: lookup("MAX_VIDEO_SIZE_MB")
                .unwrap_or_else(|| MAX_VIDEO_SIZE_MB.to_string())
                .parse::<u64>()
                .unwrap_or(MAX_VIDEO_SIZE_MB)
                .checked_mul(1024 * 1024)
                .ok_or_else(|| anyhow::anyhow!("MAX_VIDEO_SIZE_MB is too large"))?,
            video_backend,
            remote_cloud_name,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if !(self.database_url.starts_with("postgresql://")
            || self.database_url.starts_with("postgres://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than zero"));
        }

        Ok(())
    }
}
