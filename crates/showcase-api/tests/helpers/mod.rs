//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p showcase-api --test images_test`.
//! Storage and database are in-memory fakes, so no Docker or network is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::Utc;
use showcase_api::setup::routes;
use showcase_api::state::AppState;
use showcase_core::models::{ImageRecord, ImageType, NewImageRecord};
use showcase_core::{AppError, Config, ServiceConfig, StorageBackend};
use showcase_db::ImageRepository;
use showcase_storage::{Storage, StorageError, StorageResult, StoredObject};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

/// Per-file limit used by the test config.
pub const MAX_FILE_SIZE: usize = 1024;

/// File content the fake store refuses.
pub const REJECTED: &[u8] = b"REJECT";

/// Side effects of both fakes in the order they happened.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

pub struct MemoryStorage {
    events: EventLog,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload_file(
        &self,
        source: &Path,
        storage_key: &str,
        _content_type: &str,
    ) -> StorageResult<StoredObject> {
        self.events.push(format!("storage.upload:{}", storage_key));
        let data = tokio::fs::read(source).await?;
        if data == REJECTED {
            return Err(StorageError::UploadFailed("rejected by provider".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(storage_key.to_string(), data);
        Ok(StoredObject {
            key: storage_key.to_string(),
            url: format!("https://cdn.test/{}", storage_key),
        })
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.events.push(format!("storage.delete:{}", storage_key));
        self.objects.lock().unwrap().remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

pub struct MemoryRepository {
    events: EventLog,
    records: Mutex<Vec<ImageRecord>>,
    fail_inserts: bool,
}

impl MemoryRepository {
    pub fn records(&self) -> Vec<ImageRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn seed(&self, image_type: ImageType, storage_id: Option<&str>) -> ImageRecord {
        let record = ImageRecord {
            id: Uuid::new_v4(),
            image_url: format!("https://cdn.test/seed/{}", Uuid::new_v4()),
            storage_id: storage_id.map(str::to_string),
            image_type,
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        record
    }
}

#[async_trait]
impl ImageRepository for MemoryRepository {
    async fn insert_many(&self, records: &[NewImageRecord]) -> Result<Vec<ImageRecord>, AppError> {
        self.events.push(format!("db.insert_many:{}", records.len()));
        if self.fail_inserts {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let inserted: Vec<ImageRecord> = records
            .iter()
            .map(|new| ImageRecord {
                id: Uuid::new_v4(),
                image_url: new.image_url.clone(),
                storage_id: Some(new.storage_id.clone()),
                image_type: new.image_type,
                created_at: Utc::now(),
            })
            .collect();
        self.records.lock().unwrap().extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<ImageRecord>, AppError> {
        Ok(self.records())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError> {
        Ok(self.records().into_iter().find(|r| r.id == id))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        self.events.push(format!("db.delete:{}", id));
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
    pub repository: Arc<MemoryRepository>,
    pub events: EventLog,
    pub spool_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Files still sitting in the upload spool directory.
    pub fn spooled_files(&self) -> usize {
        std::fs::read_dir(self.spool_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn setup_test_app() -> TestApp {
    build_test_app(false)
}

/// Same as `setup_test_app`, but every record insert fails.
pub fn setup_test_app_with_failing_db() -> TestApp {
    build_test_app(true)
}

fn build_test_app(fail_inserts: bool) -> TestApp {
    let spool_dir = tempfile::tempdir().unwrap();
    let events = EventLog::default();

    let config = Config(Box::new(ServiceConfig {
        storage_backend: StorageBackend::Local,
        local_storage_path: Some(spool_dir.path().join("unused").display().to_string()),
        local_storage_base_url: Some("http://localhost:4000/media".to_string()),
        temp_upload_dir: Some(spool_dir.path().to_path_buf()),
        max_file_size_bytes: MAX_FILE_SIZE,
        upload_concurrency: 2,
        ..ServiceConfig::default()
    }));

    let storage = Arc::new(MemoryStorage {
        events: events.clone(),
        objects: Mutex::new(HashMap::new()),
    });
    let repository = Arc::new(MemoryRepository {
        events: events.clone(),
        records: Mutex::new(Vec::new()),
        fail_inserts,
    });

    let state = Arc::new(AppState::new(&config, storage.clone(), repository.clone()));
    let router = routes::setup_routes(&config, state).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        storage,
        repository,
        events,
        spool_dir,
    }
}

/// Multipart form with one `images` part per `(name, content)` and an optional
/// `imageTypes` field.
pub fn batch_form(files: &[(&str, &[u8])], image_types: Option<&str>) -> MultipartForm {
    let mut form = MultipartForm::new();
    if let Some(types) = image_types {
        form = form.add_text("imageTypes", types);
    }
    for (name, content) in files {
        let part = Part::bytes(content.to_vec())
            .file_name(*name)
            .mime_type("image/png");
        form = form.add_part("images", part);
    }
    form
}
