//! Storage abstraction trait
//!
//! This module defines the Storage trait that all remote object store backends
//! must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Location of an object after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Backend identifier, required to delete the object later
    pub key: String,
    /// Publicly reachable URL of the object
    pub url: String,
}

impl StoredObject {
    /// A provider answer without a URL or key cannot be referenced later.
    pub fn is_complete(&self) -> bool {
        !self.key.trim().is_empty() && !self.url.trim().is_empty()
    }
}

/// Storage abstraction trait
///
/// The upload orchestrator and delete path only talk to this trait, so they run
/// unchanged against S3, the local filesystem, or an in-memory fake in tests.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload the file at `source` under `storage_key`.
    ///
    /// The source is read from disk so request bodies never have to be held
    /// in memory as a whole.
    async fn upload_file(
        &self,
        source: &Path,
        storage_key: &str,
        content_type: &str,
    ) -> StorageResult<StoredObject>;

    /// Delete an object by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
