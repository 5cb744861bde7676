//! Showcase Storage Library
//!
//! Remote object store abstraction for uploaded images, with S3 and local
//! filesystem backends, plus the temporary spool file handle request files are
//! written to before they are uploaded.
//!
//! # Storage key format
//!
//! Every upload lands at `{folder}/{uuid}.{ext}`. Keys must not contain `..` or a
//! leading `/`. Key generation and validation live in the `keys` module so all
//! backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod temp;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::generate_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use showcase_core::StorageBackend;
pub use temp::TempUpload;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
