//! Curio API Library
//!
//! This crate provides the HTTP handlers, authentication middleware, upload
//! pipeline, and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use services::video_upload::VideoUploadService;
