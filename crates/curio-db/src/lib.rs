//! Curio Database Layer
//!
//! Postgres repositories for video assets and users. Each repository sits
//! behind an async trait so the HTTP layer can run against in-memory
//! implementations in tests.

pub mod db;

pub use db::{UserDirectory, UserRepository, VideoRecorder, VideoRepository};
