//! Application state shared by every handler.
//!
//! Split into sub-states so the persistence seams and the byte-handling pieces
//! can be swapped independently in tests.

use curio_core::Config;
use curio_db::{UserDirectory, VideoRecorder};
use curio_storage::{CleanupCoordinator, StagingArea, VideoStorage};
use std::sync::Arc;

/// Persistence seams
#[derive(Clone)]
pub struct DbState {
    pub videos: Arc<dyn VideoRecorder>,
    pub users: Arc<dyn UserDirectory>,
}

/// Staging, storage and cleanup for video bytes
#[derive(Clone)]
pub struct MediaState {
    pub staging: StagingArea,
    pub storage: VideoStorage,
    pub cleanup: CleanupCoordinator,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub media: MediaState,
}
