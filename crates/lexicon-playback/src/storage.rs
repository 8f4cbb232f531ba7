//! The [`Storage`] seam between the streamer and the filesystem.

use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncSeek};

use crate::error::{Error, Result};

/// A readable, seekable byte source the streamer can own for one response.
pub trait SeekableRead: AsyncRead + AsyncSeek + Send + Unpin {}

impl<T: AsyncRead + AsyncSeek + Send + Unpin> SeekableRead for T {}

/// Read-only access to stored media files.
///
/// Implementations must be safe to share across threads (`Send + Sync`);
/// the streamer calls them concurrently from every in-flight request.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Whether a regular file exists at `path`.
    async fn exists(&self, path: &Path) -> bool;

    /// Size of the file at `path` in bytes.
    async fn file_size(&self, path: &Path) -> Result<u64>;

    /// Open the file at `path` for reading, positioned at byte 0.
    async fn open_for_read(&self, path: &Path) -> Result<Box<dyn SeekableRead>>;
}

/// [`Storage`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn file_size(&self, path: &Path) -> Result<u64> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| Error::not_found("file", path.display()))?;
        Ok(metadata.len())
    }

    async fn open_for_read(&self, path: &Path) -> Result<Box<dyn SeekableRead>> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Box::new(file))
    }
}
