//! Database repositories for data access layer

pub mod user;
pub mod video;

pub use user::{UserDirectory, UserRepository};
pub use video::{VideoRecorder, VideoRepository};
