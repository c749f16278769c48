//! Staging area, storage backend and cleanup wiring

use anyhow::{Context, Result};
use curio_core::Config;
use curio_storage::{create_video_storage, CleanupCoordinator, LocalStorage, StagingArea};

use crate::state::MediaState;

pub async fn setup_media(config: &Config) -> Result<MediaState> {
    let staging = StagingArea::new(config.upload_dir(), config.max_video_size_bytes())
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory {}",
                config.upload_dir().display()
            )
        })?;

    let storage = create_video_storage(config).context("Failed to initialize video storage")?;
    let cleanup = CleanupCoordinator::new(
        LocalStorage::new(staging.dir()),
        storage.remote_client(),
    );

    tracing::info!(
        backend = %storage.kind(),
        upload_dir = %staging.dir().display(),
        max_video_bytes = config.max_video_size_bytes(),
        "Video storage initialized"
    );

    Ok(MediaState {
        staging,
        storage,
        cleanup,
    })
}
