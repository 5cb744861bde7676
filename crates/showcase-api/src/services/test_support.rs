//! In-process fakes for the storage and repository seams.
//!
//! Both fakes write into one shared `CallLog` so tests can assert the order of
//! side effects across the two backends, or that a call never happened.

use async_trait::async_trait;
use chrono::Utc;
use showcase_core::models::{ImageRecord, ImageType, NewImageRecord};
use showcase_core::{AppError, StorageBackend};
use showcase_db::ImageRepository;
use showcase_storage::{Storage, StorageError, StorageResult, StoredObject, TempUpload};
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::batch_upload::UploadCandidate;

/// File content the fake provider rejects.
pub(crate) const FAIL_UPLOAD: &[u8] = b"FAIL";
/// File content for which the fake provider answers without a URL.
pub(crate) const NO_URL: &[u8] = b"NO_URL";
/// File content the fake provider removes from disk while uploading.
pub(crate) const CONSUME: &[u8] = b"CONSUME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Upload(String),
    DeleteObject(String),
    InsertMany(usize),
    FindAll,
    FindById(Uuid),
    DeleteRecord(Uuid),
}

#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn upload_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Upload(_)))
            .count()
    }

    pub(crate) fn insert_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::InsertMany(_)))
            .count()
    }
}

pub(crate) struct FakeStorage {
    log: CallLog,
    fail_deletes: bool,
}

impl FakeStorage {
    pub(crate) fn new(log: &CallLog) -> Arc<Self> {
        Arc::new(FakeStorage {
            log: log.clone(),
            fail_deletes: false,
        })
    }

    pub(crate) fn failing_deletes(log: &CallLog) -> Arc<Self> {
        Arc::new(FakeStorage {
            log: log.clone(),
            fail_deletes: true,
        })
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn upload_file(
        &self,
        source: &Path,
        storage_key: &str,
        _content_type: &str,
    ) -> StorageResult<StoredObject> {
        self.log.push(Call::Upload(storage_key.to_string()));
        let data = tokio::fs::read(source).await?;

        let url = format!("https://cdn.test/{}", storage_key);
        if data == FAIL_UPLOAD {
            return Err(StorageError::UploadFailed("provider rejected file".to_string()));
        }
        if data == NO_URL {
            return Ok(StoredObject {
                key: storage_key.to_string(),
                url: String::new(),
            });
        }
        if data == CONSUME {
            tokio::fs::remove_file(source).await?;
        }

        Ok(StoredObject {
            key: storage_key.to_string(),
            url,
        })
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.log.push(Call::DeleteObject(storage_key.to_string()));
        if self.fail_deletes {
            return Err(StorageError::DeleteFailed("provider unavailable".to_string()));
        }
        Ok(())
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

pub(crate) struct FakeRepository {
    log: CallLog,
    records: Mutex<Vec<ImageRecord>>,
    fail_inserts: bool,
}

impl FakeRepository {
    pub(crate) fn new(log: &CallLog) -> Arc<Self> {
        Self::with_records(log, Vec::new())
    }

    pub(crate) fn with_records(log: &CallLog, records: Vec<ImageRecord>) -> Arc<Self> {
        Arc::new(FakeRepository {
            log: log.clone(),
            records: Mutex::new(records),
            fail_inserts: false,
        })
    }

    pub(crate) fn failing_inserts(log: &CallLog) -> Arc<Self> {
        Arc::new(FakeRepository {
            log: log.clone(),
            records: Mutex::new(Vec::new()),
            fail_inserts: true,
        })
    }

    pub(crate) fn stored(&self) -> Vec<ImageRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageRepository for FakeRepository {
    async fn insert_many(&self, records: &[NewImageRecord]) -> Result<Vec<ImageRecord>, AppError> {
        self.log.push(Call::InsertMany(records.len()));
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
        self.log.push(Call::FindAll);
        Ok(self.stored())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ImageRecord>, AppError> {
        self.log.push(Call::FindById(id));
        Ok(self.stored().into_iter().find(|r| r.id == id))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        self.log.push(Call::DeleteRecord(id));
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Spool `content` into a fresh temp file inside `dir`.
pub(crate) async fn candidate(dir: &Path, name: &str, content: &[u8]) -> UploadCandidate {
    let mut temp = TempUpload::create_in(dir).unwrap();
    temp.write_chunk(content).await.unwrap();
    temp.finish().await.unwrap();
    UploadCandidate::new(temp, name, "image/png")
}

pub(crate) fn record(image_type: ImageType, storage_id: Option<&str>) -> ImageRecord {
    ImageRecord {
        id: Uuid::new_v4(),
        image_url: format!("https://cdn.test/{}", Uuid::new_v4()),
        storage_id: storage_id.map(str::to_string),
        image_type,
        created_at: Utc::now(),
    }
}
