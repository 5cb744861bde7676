use crate::error::{ErrorResponse, HttpAppError};
use crate::responses::MessageResponse;
use crate::services::ImageLifecycleService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use showcase_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/images/{id}",
    tag = "images",
    params(
        ("id" = String, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image deleted", body = MessageResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(image_id = %id, operation = "delete_image"))]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    // Ids are UUIDs, so anything else cannot exist
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFound("Image not found".to_string()))?;

    ImageLifecycleService::delete_image(&state.storage, &state.repository, id).await?;

    Ok(Json(MessageResponse::ok("Image deleted")))
}
