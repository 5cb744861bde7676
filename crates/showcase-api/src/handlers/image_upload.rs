use crate::error::{ErrorResponse, HttpAppError};
use crate::responses::UploadResponse;
use crate::services::BatchUploadService;
use crate::state::AppState;
use crate::utils::upload::extract_batch_form;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/images",
    tag = "images",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Files in repeated `images` fields and a comma-separated `imageTypes` field (big|small), one tag per file"
    ),
    responses(
        (status = 201, description = "At least one image stored; failed files are listed in failedUploads", body = UploadResponse),
        (status = 400, description = "Empty batch, missing or mismatched imageTypes, or too many files", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Every upload failed or the records could not be saved", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_images"))]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = extract_batch_form(multipart, &state.upload).await?;

    let result = BatchUploadService::from_state(&state)
        .process_batch(form.candidates, form.image_types.as_deref())
        .await?;

    tracing::info!(
        stored = result.succeeded.len(),
        failed = result.failed_names.len(),
        "Batch upload completed"
    );

    Ok((StatusCode::CREATED, Json(UploadResponse::from(result))))
}
