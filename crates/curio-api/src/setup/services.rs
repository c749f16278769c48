//! Repository wiring

use crate::state::{AppState, DbState, MediaState};
use curio_core::Config;
use curio_db::{UserRepository, VideoRepository};
use sqlx::PgPool;
use std::sync::Arc;

pub fn initialize_services(config: &Config, pool: PgPool, media: MediaState) -> Arc<AppState> {
    let db = DbState {
        videos: Arc::new(VideoRepository::new(pool.clone())),
        users: Arc::new(UserRepository::new(pool)),
    };

    Arc::new(AppState {
        config: config.clone(),
        db,
        media,
    })
}
