use crate::error::{ErrorResponse, HttpAppError};
use crate::responses::ListResponse;
use crate::services::select_listing;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/get-image",
    tag = "images",
    responses(
        (status = 200, description = "Up to 8 big images followed by up to 7 small images", body = ListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_images"))]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse>, HttpAppError> {
    let records = state.repository.find_all().await?;
    let images = select_listing(records);

    tracing::debug!(returned = images.len(), "Listing images");

    Ok(Json(ListResponse {
        success: true,
        images,
    }))
}
