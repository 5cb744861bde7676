//! Temporary spool files for incoming uploads.
//!
//! Every file of a multipart request is written to a `TempUpload` before it is
//! sent to the remote store. The handle owns the file on disk: it is removed by
//! the first `release()` call, or on drop if nobody released it.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

const TEMP_PREFIX: &str = "showcase-upload-";

#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    file: Option<File>,
    temp: Option<TempPath>,
    size: u64,
}

impl TempUpload {
    /// Create an empty spool file inside `dir`.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        let named = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(dir)?;
        let (file, temp) = named.into_parts();

        Ok(TempUpload {
            path: temp.to_path_buf(),
            file: Some(File::from_std(file)),
            temp: Some(temp),
            size: 0,
        })
    }

    /// Append a chunk to the spool file.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::other("temporary upload is closed for writing"))?;
        file.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Flush and close the write side. Further writes fail.
    pub async fn finish(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written so far.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_released(&self) -> bool {
        self.temp.is_none()
    }

    /// Remove the spool file.
    ///
    /// Returns whether this call removed it. Removal failures are logged and
    /// swallowed; calling this again is a no-op.
    ///
    /// Removal is a synchronous `unlink` on the calling thread, so `Drop` can
    /// share it. A batch holds at most a handful of spool files.
    pub fn release(&mut self) -> bool {
        self.file.take();
        let Some(temp) = self.temp.take() else {
            return false;
        };

        match temp.close() {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Released temporary upload");
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "Temporary upload was already removed"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove temporary upload"
                );
                false
            }
        }
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_and_releases_once() {
        let dir = tempdir().unwrap();
        let mut upload = TempUpload::create_in(dir.path()).unwrap();

        upload.write_chunk(b"hello ").await.unwrap();
        upload.write_chunk(b"world").await.unwrap();
        upload.finish().await.unwrap();

        let path = upload.path().to_path_buf();
        assert_eq!(upload.size(), 11);
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello world");

        assert!(upload.release());
        assert!(!path.exists());
        assert!(upload.is_released());

        // Second release does nothing
        assert!(!upload.release());
    }

    #[tokio::test]
    async fn writing_after_finish_fails() {
        let dir = tempdir().unwrap();
        let mut upload = TempUpload::create_in(dir.path()).unwrap();
        upload.finish().await.unwrap();

        assert!(upload.write_chunk(b"late").await.is_err());
    }

    #[tokio::test]
    async fn drop_removes_unreleased_file() {
        let dir = tempdir().unwrap();
        let upload = TempUpload::create_in(dir.path()).unwrap();
        let path = upload.path().to_path_buf();
        assert!(path.exists());

        drop(upload);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn release_tolerates_externally_removed_file() {
        let dir = tempdir().unwrap();
        let mut upload = TempUpload::create_in(dir.path()).unwrap();
        std::fs::remove_file(upload.path()).unwrap();

        assert!(!upload.release());
        assert!(upload.is_released());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(TempUpload::create_in(&dir.path().join("nope")).is_err());
    }
}
