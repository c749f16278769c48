//! Curio Core Library
//!
//! This crate provides the domain models, error types, configuration, and URL
//! resolution shared by every Curio component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod urls;

// Re-export commonly used types
pub use config::{BaseConfig, Config, RemoteMediaConfig, VideoBackend, VideoServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use urls::{resolve_video_urls, ResolvedUrls, UrlContext};
