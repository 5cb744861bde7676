//! OpenAPI documentation, served as `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::responses;
use showcase_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Showcase API",
        version = "0.1.0",
        description = "Image showcase backend: batch uploads of banner (big) and thumbnail (small) images, a curated listing and deletes."
    ),
    paths(
        handlers::image_upload::upload_images,
        handlers::image_list::list_images,
        handlers::image_delete::delete_image,
    ),
    components(
        schemas(
            models::ImageType,
            models::ImageRecord,
            models::ImageSummary,
            responses::UploadResponse,
            responses::ListResponse,
            responses::MessageResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "images", description = "Batch upload, listing and deletion of showcase images")
    )
)]
pub struct ApiDoc;
