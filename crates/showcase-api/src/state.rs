use showcase_core::Config;
use showcase_db::ImageRepository;
use showcase_storage::Storage;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub repository: Arc<dyn ImageRepository>,
    pub upload: UploadConfig,
}

/// Upload settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub folder: String,
    pub temp_dir: PathBuf,
    pub max_file_size_bytes: usize,
    pub concurrency: usize,
}

impl UploadConfig {
    pub fn from_config(config: &Config) -> Self {
        UploadConfig {
            folder: config.upload_folder().to_string(),
            temp_dir: config.temp_upload_dir(),
            max_file_size_bytes: config.max_file_size_bytes(),
            concurrency: config.upload_concurrency().max(1),
        }
    }
}

impl AppState {
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn ImageRepository>,
    ) -> Self {
        AppState {
            storage,
            repository,
            upload: UploadConfig::from_config(config),
        }
    }
}
