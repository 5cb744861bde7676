//! Image lifecycle: removal of a stored image and its remote object.

use showcase_core::models::ImageRecord;
use showcase_core::AppError;
use showcase_db::ImageRepository;
use showcase_storage::Storage;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::storage_error_to_app;

const NOT_FOUND_MESSAGE: &str = "Image not found";

pub struct ImageLifecycleService;

impl ImageLifecycleService {
    /// Delete an image: remote object first (when it has one), then the record.
    ///
    /// A failed remote delete leaves the record in place so the delete can be
    /// retried.
    pub async fn delete_image(
        storage: &Arc<dyn Storage>,
        repository: &Arc<dyn ImageRepository>,
        id: Uuid,
    ) -> Result<ImageRecord, AppError> {
        let record = repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        if let Some(storage_key) = record.storage_id.as_deref().filter(|k| !k.is_empty()) {
            storage.delete(storage_key).await.map_err(|e| {
                tracing::error!(
                    error = %e,
                    image_id = %id,
                    storage_key = %storage_key,
                    "Failed to delete image from storage"
                );
                storage_error_to_app(e)
            })?;
        }

        // Someone else may have removed the row in the meantime
        if !repository.delete_by_id(id).await? {
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }

        tracing::info!(image_id = %id, "Image deleted");

        Ok(record)
    }
}
