//! Batch upload orchestration
//!
//! Takes the spooled files of one request plus its `imageTypes` string and
//! turns them into stored images: validate the whole batch, upload every file
//! independently, then persist all successes with a single insert. Every
//! spooled file is released exactly once on every path through here.

use futures::stream::{self, StreamExt};
use showcase_core::models::{BatchResult, ImageType, NewImageRecord};
use showcase_core::AppError;
use showcase_db::ImageRepository;
use showcase_storage::{generate_storage_key, Storage, TempUpload};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::state::AppState;

/// One spooled file waiting for its remote upload.
#[derive(Debug)]
pub struct UploadCandidate {
    temp: TempUpload,
    original_name: String,
    content_type: String,
}

impl UploadCandidate {
    pub fn new(
        temp: TempUpload,
        original_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        UploadCandidate {
            temp,
            original_name: original_name.into(),
            content_type: content_type.into(),
        }
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn size(&self) -> u64 {
        self.temp.size()
    }

    pub fn release(&mut self) -> bool {
        self.temp.release()
    }
}

enum ItemOutcome {
    Stored(NewImageRecord),
    Failed(String),
}

/// Parse the comma-separated type list against the number of received files.
///
/// Checks run in a fixed order: empty batch, missing list, count mismatch,
/// then unknown tags.
pub fn parse_image_types(
    file_count: usize,
    types_raw: Option<&str>,
) -> Result<Vec<ImageType>, AppError> {
    if file_count == 0 {
        return Err(AppError::EmptyBatch);
    }

    let raw = match types_raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AppError::MissingImageTypes),
    };

    let tags: Vec<&str> = raw.split(',').map(str::trim).collect();
    if tags.len() != file_count {
        return Err(AppError::ImageTypeCountMismatch {
            types: tags.len(),
            files: file_count,
        });
    }

    tags.into_iter().map(str::parse).collect()
}

/// Drives one batch from spooled files to persisted records.
#[derive(Clone)]
pub struct BatchUploadService {
    storage: Arc<dyn Storage>,
    repository: Arc<dyn ImageRepository>,
    folder: String,
    concurrency: usize,
}

impl BatchUploadService {
    pub fn new(
        storage: Arc<dyn Storage>,
        repository: Arc<dyn ImageRepository>,
        folder: impl Into<String>,
        concurrency: usize,
    ) -> Self {
        BatchUploadService {
            storage,
            repository,
            folder: folder.into(),
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.storage.clone(),
            state.repository.clone(),
            state.upload.folder.clone(),
            state.upload.concurrency,
        )
    }

    /// Upload and persist a batch.
    ///
    /// Returns the stored records (request order) and the original names of the
    /// files that failed remote upload. Nothing is uploaded when validation
    /// fails, and nothing is persisted when every upload fails.
    #[tracing::instrument(skip(self, candidates, types_raw), fields(files = candidates.len()))]
    pub async fn process_batch(
        &self,
        mut candidates: Vec<UploadCandidate>,
        types_raw: Option<&str>,
    ) -> Result<BatchResult, AppError> {
        let image_types = match parse_image_types(candidates.len(), types_raw) {
            Ok(types) => types,
            Err(e) => {
                for candidate in candidates.iter_mut() {
                    candidate.release();
                }
                return Err(e);
            }
        };

        let total = candidates.len();
        let start = Instant::now();

        let (pending, failed) = stream::iter(candidates.into_iter().zip(image_types))
            .map(|(candidate, image_type)| {
                let service = self.clone();
                async move { service.upload_candidate(candidate, image_type).await }
            })
            .buffered(self.concurrency)
            .fold(
                (Vec::with_capacity(total), Vec::new()),
                |(mut pending, mut failed), outcome| async move {
                    match outcome {
                        ItemOutcome::Stored(record) => pending.push(record),
                        ItemOutcome::Failed(name) => failed.push(name),
                    }
                    (pending, failed)
                },
            )
            .await;

        debug_assert_eq!(pending.len() + failed.len(), total);

        tracing::info!(
            uploaded = pending.len(),
            failed = failed.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Batch remote uploads finished"
        );

        if pending.is_empty() {
            return Err(AppError::AllUploadsFailed { failed });
        }

        match self.repository.insert_many(&pending).await {
            Ok(succeeded) => Ok(BatchResult {
                succeeded,
                failed_names: failed,
            }),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    uploaded = pending.len(),
                    "Failed to persist batch, removing uploaded objects"
                );
                self.compensate(pending.into_iter().map(|record| record.storage_id).collect())
                    .await;
                Err(AppError::PersistenceFailure(Box::new(e)))
            }
        }
    }

    async fn upload_candidate(
        &self,
        mut candidate: UploadCandidate,
        image_type: ImageType,
    ) -> ItemOutcome {
        let storage_key = generate_storage_key(&self.folder, &candidate.original_name);

        let result = self
            .storage
            .upload_file(candidate.path(), &storage_key, &candidate.content_type)
            .await;

        // Spool file is no longer needed whatever the outcome
        candidate.release();

        match result {
            Ok(stored) if stored.is_complete() => {
                tracing::debug!(
                    file_name = %candidate.original_name,
                    storage_key = %stored.key,
                    size_bytes = candidate.size(),
                    image_type = %image_type,
                    "Image uploaded"
                );
                ItemOutcome::Stored(NewImageRecord {
                    image_url: stored.url,
                    storage_id: stored.key,
                    image_type,
                })
            }
            Ok(stored) => {
                tracing::warn!(
                    file_name = %candidate.original_name,
                    storage_key = %stored.key,
                    "Storage returned an object without URL or key"
                );
                ItemOutcome::Failed(candidate.original_name)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    file_name = %candidate.original_name,
                    storage_key = %storage_key,
                    "Image upload failed"
                );
                ItemOutcome::Failed(candidate.original_name)
            }
        }
    }

    /// Best-effort removal of objects whose records could not be written.
    async fn compensate(&self, storage_keys: Vec<String>) {
        stream::iter(storage_keys)
            .map(|storage_key| {
                let storage = self.storage.clone();
                async move {
                    if let Err(e) = storage.delete(&storage_key).await {
                        tracing::warn!(
                            error = %e,
                            storage_key = %storage_key,
                            "Failed to remove orphaned object"
                        );
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<()>>()
            .await;
    }
}
