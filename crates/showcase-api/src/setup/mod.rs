//! Application setup and initialization
//!
//! Everything `main.rs` needs to go from a loaded `Config` to a ready router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use showcase_core::Config;
use showcase_db::PgImageRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_tracing(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    crate::error::set_production_mode(config.is_production());

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let repository = Arc::new(PgImageRepository::new(pool));

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(&config, storage, repository));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
