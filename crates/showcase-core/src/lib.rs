//! Showcase Core Library
//!
//! This crate provides core domain models, error types, configuration and the
//! listing policy constants shared across all Showcase components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
// Note: Storage, StorageError, StorageResult live in the showcase-storage crate
