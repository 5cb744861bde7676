//! Shared key generation for storage backends.
//!
//! Key format: `{folder}/{uuid}.{ext}`, or `{uuid}.{ext}` when the folder is empty.

use crate::{StorageError, StorageResult};
use std::path::Path;
use uuid::Uuid;

const DEFAULT_EXTENSION: &str = "bin";
const MAX_EXTENSION_LEN: usize = 10;

/// Generate a fresh storage key inside `folder` for a file named `original_name`.
///
/// The original name only contributes its extension; the rest of the key is a
/// random UUID so client-provided names never collide or escape the folder.
pub fn generate_storage_key(folder: &str, original_name: &str) -> String {
    let extension = file_extension(original_name).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let folder = folder.trim_matches('/');

    if folder.is_empty() {
        format!("{}.{}", Uuid::new_v4(), extension)
    } else {
        format!("{}/{}.{}", folder, Uuid::new_v4(), extension)
    }
}

/// Reject keys that could resolve outside the backend root.
pub fn validate_storage_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

fn file_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
