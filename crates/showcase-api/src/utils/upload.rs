//! Multipart extraction for batch uploads
//!
//! Files are streamed chunk by chunk into `TempUpload` spool files so request
//! bodies are never buffered in memory. On any error the spool files created
//! so far are dropped, which removes them from disk.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use showcase_core::constants::{IMAGES_FIELD, IMAGE_TYPES_FIELD, MAX_BATCH_FILES};
use showcase_core::AppError;
use showcase_storage::TempUpload;

use crate::services::UploadCandidate;
use crate::state::UploadConfig;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Files and type list read from one upload request.
#[derive(Debug, Default)]
pub struct BatchForm {
    pub candidates: Vec<UploadCandidate>,
    /// Raw `imageTypes` value; `None` when the field is absent or repeated
    pub image_types: Option<String>,
}

/// Read the `images` files and the `imageTypes` text field of a request.
pub async fn extract_batch_form(
    mut multipart: Multipart,
    upload: &UploadConfig,
) -> Result<BatchForm, AppError> {
    let mut form = BatchForm::default();
    let mut image_types_fields = 0usize;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == IMAGE_TYPES_FIELD {
            let text = field.text().await.map_err(multipart_error)?;
            image_types_fields += 1;
            form.image_types = Some(text);
        } else if field_name == IMAGES_FIELD {
            if form.candidates.len() >= MAX_BATCH_FILES {
                return Err(AppError::TooManyFiles {
                    max: MAX_BATCH_FILES,
                });
            }

            let original_name = display_name(field.file_name());
            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();

            let mut temp = TempUpload::create_in(&upload.temp_dir).map_err(|e| {
                AppError::Internal(format!("Failed to create temporary upload file: {}", e))
            })?;

            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                if temp.size() + chunk.len() as u64 > upload.max_file_size_bytes as u64 {
                    return Err(AppError::PayloadTooLarge(format!(
                        "File '{}' exceeds maximum allowed size of {} MB",
                        original_name,
                        upload.max_file_size_bytes / 1024 / 1024
                    )));
                }
                temp.write_chunk(&chunk).await?;
            }
            temp.finish().await?;

            tracing::debug!(
                file_name = %original_name,
                size_bytes = temp.size(),
                "Spooled upload to disk"
            );

            form.candidates
                .push(UploadCandidate::new(temp, original_name, content_type));
        } else {
            tracing::debug!(field = %field_name, "Ignoring unexpected multipart field");
        }
    }

    // Ambiguous type list; batch validation rejects it as missing
    if image_types_fields > 1 {
        tracing::debug!(
            occurrences = image_types_fields,
            "Repeated imageTypes field"
        );
        form.image_types = None;
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", e.body_text()))
    }
}

/// Name reported back to the client for a file: the client's filename without
/// any directory part, or `"unknown"`.
pub fn display_name(filename: Option<&str>) -> String {
    filename
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name).trim())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}
