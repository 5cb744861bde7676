//! Route groups by domain.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Image upload, listing and delete routes.
pub fn image_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/images", API_PREFIX),
            post(handlers::image_upload::upload_images),
        )
        .route(
            &format!("{}/get-image", API_PREFIX),
            get(handlers::image_list::list_images),
        )
        .route(
            &format!("{}/images/{{id}}", API_PREFIX),
            delete(handlers::image_delete::delete_image),
        )
}
