use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppError;

/// Display category of a stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "image_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Big,
    Small,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Big => "big",
            ImageType::Small => "small",
        }
    }
}

/// Tags are matched exactly after trimming; `Big` or `SMALL` are rejected.
impl FromStr for ImageType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "big" => Ok(ImageType::Big),
            "small" => Ok(ImageType::Small),
            other => Err(AppError::InvalidImageType(other.to_string())),
        }
    }
}

impl Display for ImageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Persisted image record. Only created after a successful remote upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: Uuid,
    pub image_url: String,
    /// Remote store identifier, needed to delete the remote object.
    pub storage_id: Option<String>,
    pub image_type: ImageType,
    pub created_at: DateTime<Utc>,
}

/// Record waiting to be persisted after its remote upload succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImageRecord {
    pub image_url: String,
    pub storage_id: String,
    pub image_type: ImageType,
}

/// Externally visible projection used by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub id: Uuid,
    pub image_url: String,
    pub image_type: ImageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<String>,
}

impl From<ImageRecord> for ImageSummary {
    fn from(record: ImageRecord) -> Self {
        ImageSummary {
            id: record.id,
            image_url: record.image_url,
            image_type: record.image_type,
            storage_id: record.storage_id,
        }
    }
}
