//! Curio Storage Library
//!
//! Everything that touches video bytes: the staging area that receives uploads,
//! the local and remote backends, the selector that applies the configured
//! backend, and the coordinator that removes bytes after failures and deletions.
//!
//! # Identity model
//!
//! Local videos are identified by their generated filename inside the upload
//! directory. Remote videos are identified by the public id the media service
//! returned; their storage location is the service's URL.

pub mod cleanup;
pub mod cloudinary;
pub mod local;
pub mod remote;
pub mod selector;
pub mod staging;
pub mod traits;

// Re-export commonly used types
pub use cleanup::CleanupCoordinator;
pub use cloudinary::CloudinaryClient;
pub use curio_core::StorageBackend;
pub use local::LocalStorage;
pub use remote::{RemoteMediaClient, RemoteResourceType, RemoteUpload, RemoteUploadOptions};
pub use selector::{create_video_storage, VideoStorage};
pub use staging::{StagedFile, StagingArea, StagingError};
pub use traits::{StorageError, StorageResult, StoredVideo};
