//! Storage setup and initialization

use anyhow::{Context, Result};
use showcase_core::Config;
use showcase_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the configured remote store and make sure the spool directory exists.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = %storage.backend_type(),
        upload_folder = %config.upload_folder(),
        "Storage initialized successfully"
    );

    let temp_dir = config.temp_upload_dir();
    tokio::fs::create_dir_all(&temp_dir)
        .await
        .with_context(|| format!("Failed to create temp upload dir {}", temp_dir.display()))?;
    tracing::debug!(temp_dir = %temp_dir.display(), "Upload spool directory ready");

    Ok(storage)
}
