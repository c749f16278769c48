//! Application setup and initialization
//!
//! Everything main.rs needs to go from a loaded `Config` to a served router.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use curio_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        backend = %config.video_backend().kind(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let media = storage::setup_media(&config).await?;
    let state = services::initialize_services(&config, pool, media);

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
