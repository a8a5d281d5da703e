//! Storage abstraction trait
//!
//! This module defines the Storage trait that the merge orchestrator talks to.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    Unauthorized(String),

    #[error("Invalid blob name: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// An implementation is bound to a single container. Downloads return the
/// whole blob body; uploads replace whatever is stored under the name.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download the full body of a blob.
    async fn download(&self, blob_name: &str) -> StorageResult<Vec<u8>>;

    /// Upload `data` as the body of `blob_name` and return its URL.
    ///
    /// An existing blob of the same name is overwritten unconditionally.
    async fn upload(&self, blob_name: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Name of the container this client is bound to.
    fn container(&self) -> &str;
}
