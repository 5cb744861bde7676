//! Success envelopes returned by the image endpoints.

use serde::{Deserialize, Serialize};
use showcase_core::models::{BatchResult, ImageRecord, ImageSummary};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    /// Stored records, in the order the files were sent
    pub images: Vec<ImageRecord>,
    /// Original names of files that could not be stored; empty when all succeeded
    #[serde(default)]
    pub failed_uploads: Vec<String>,
}

impl From<BatchResult> for UploadResponse {
    fn from(result: BatchResult) -> Self {
        UploadResponse {
            success: true,
            message: result.message(),
            images: result.succeeded,
            failed_uploads: result.failed_names,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListResponse {
    pub success: bool,
    /// Big images first, then small images
    pub images: Vec<ImageSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        MessageResponse {
            success: true,
            message: message.into(),
        }
    }
}
