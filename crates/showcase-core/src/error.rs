//! Error types module
//!
//! All failures of the showcase service are unified under `AppError`. The batch
//! upload taxonomy (validation, total failure, persistence failure) lives here
//! next to the generic database/storage/internal variants so HTTP mapping has a
//! single source of truth.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("No images uploaded")]
    EmptyBatch,

    #[error("Invalid imageTypes string")]
    MissingImageTypes,

    #[error("Mismatch between imageTypes and files: {types} types for {files} files")]
    ImageTypeCountMismatch { types: usize, files: usize },

    #[error("Invalid image type: '{0}'")]
    InvalidImageType(String),

    #[error("Too many files: at most {max} images per batch")]
    TooManyFiles { max: usize },

    #[error("All uploads failed: {}", failed.join(", "))]
    AllUploadsFailed { failed: Vec<String> },

    #[error("Failed to persist uploaded images")]
    PersistenceFailure(#[source] Box<AppError>),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Database(_) => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::Storage(_) => (500, "STORAGE_ERROR", true, LogLevel::Error),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Debug),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", true, LogLevel::Error)
        }
        AppError::EmptyBatch => (400, "EMPTY_BATCH", false, LogLevel::Debug),
        AppError::MissingImageTypes => (400, "MISSING_IMAGE_TYPES", false, LogLevel::Debug),
        AppError::ImageTypeCountMismatch { .. } => {
            (400, "IMAGE_TYPE_COUNT_MISMATCH", false, LogLevel::Debug)
        }
        AppError::InvalidImageType(_) => (400, "INVALID_IMAGE_TYPE", false, LogLevel::Debug),
        AppError::TooManyFiles { .. } => (400, "TOO_MANY_FILES", false, LogLevel::Debug),
        AppError::AllUploadsFailed { .. } => (500, "ALL_UPLOADS_FAILED", false, LogLevel::Warn),
        AppError::PersistenceFailure(_) => (500, "PERSISTENCE_FAILURE", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
            AppError::EmptyBatch => "EmptyBatch",
            AppError::MissingImageTypes => "MissingImageTypes",
            AppError::ImageTypeCountMismatch { .. } => "ImageTypeCountMismatch",
            AppError::InvalidImageType(_) => "InvalidImageType",
            AppError::TooManyFiles { .. } => "TooManyFiles",
            AppError::AllUploadsFailed { .. } => "AllUploadsFailed",
            AppError::PersistenceFailure(_) => "PersistenceFailure",
        }
    }

    /// True for client-caused batch rejections that happen before any upload.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyBatch
                | AppError::MissingImageTypes
                | AppError::ImageTypeCountMismatch { .. }
                | AppError::InvalidImageType(_)
                | AppError::TooManyFiles { .. }
        )
    }

    /// Names of the files that could not be stored, when the error carries them.
    pub fn failed_uploads(&self) -> Option<&[String]> {
        match self {
            AppError::AllUploadsFailed { failed } => Some(failed),
            _ => None,
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
            AppError::EmptyBatch => "No images uploaded".to_string(),
            AppError::MissingImageTypes => "Invalid imageTypes string".to_string(),
            AppError::ImageTypeCountMismatch { .. } => {
                "Mismatch between imageTypes and files".to_string()
            }
            AppError::InvalidImageType(tag) => {
                format!("Invalid image type '{}': expected 'big' or 'small'", tag)
            }
            AppError::TooManyFiles { max } => {
                format!("Too many files: at most {} images per batch", max)
            }
            AppError::AllUploadsFailed { failed } if failed.is_empty() => {
                "No images uploaded.".to_string()
            }
            AppError::AllUploadsFailed { failed } => {
                format!("No images uploaded successfully. Failed: {}", failed.join(", "))
            }
            AppError::PersistenceFailure(_) => "Server error during batch upload".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let errors = [
            AppError::EmptyBatch,
            AppError::MissingImageTypes,
            AppError::ImageTypeCountMismatch { types: 1, files: 2 },
            AppError::InvalidImageType("huge".to_string()),
            AppError::TooManyFiles { max: 15 },
        ];
        for err in errors {
            assert!(err.is_validation(), "{:?}", err);
            assert_eq!(err.http_status_code(), 400, "{:?}", err);
            assert!(!err.is_sensitive());
        }
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(AppError::EmptyBatch.client_message(), "No images uploaded");
        assert_eq!(
            AppError::MissingImageTypes.client_message(),
            "Invalid imageTypes string"
        );
        assert_eq!(
            AppError::ImageTypeCountMismatch { types: 2, files: 3 }.client_message(),
            "Mismatch between imageTypes and files"
        );
    }

    #[test]
    fn test_all_uploads_failed() {
        let err = AppError::AllUploadsFailed {
            failed: vec!["a.png".to_string(), "b.png".to_string()],
        };
        assert_eq!(err.http_status_code(), 500);
        assert!(!err.is_validation());
        assert_eq!(
            err.client_message(),
            "No images uploaded successfully. Failed: a.png, b.png"
        );
        assert_eq!(err.failed_uploads().map(|f| f.len()), Some(2));

        let empty = AppError::AllUploadsFailed { failed: vec![] };
        assert_eq!(empty.client_message(), "No images uploaded.");
    }

    #[test]
    fn test_persistence_failure_keeps_cause() {
        let err = AppError::PersistenceFailure(Box::new(AppError::Internal(
            "connection reset".to_string(),
        )));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "PERSISTENCE_FAILURE");
        assert_eq!(err.client_message(), "Server error during batch upload");
        assert!(err.detailed_message().contains("connection reset"));
        assert!(err.failed_uploads().is_none());
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Image not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.client_message(), "Image not found");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }
}
