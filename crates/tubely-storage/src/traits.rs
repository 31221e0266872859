//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Every object lives in a namespace (the S3 bucket, or the configured local namespace)
/// under a key. The namespace a backend writes into is reported by [`Storage::namespace`]
/// so callers can record where an object went.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Namespace (bucket) that `put_*` calls write into.
    fn namespace(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Whether [`Storage::presigned_get_url`] can sign objects in `namespace`.
    fn can_sign(&self, _namespace: &str) -> bool {
        true
    }

    /// Publish the contents of `reader` under `storage_key`, tagged with `content_type`.
    ///
    /// The reader is consumed until EOF. `content_length` is a hint only.
    async fn put_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        content_length: Option<u64>,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()>;

    /// Write a small object in one call and return its public URL.
    async fn put_object(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Time-limited GET URL for `namespace`/`storage_key`.
    ///
    /// Computed from credentials alone; no request reaches the store.
    async fn presigned_get_url(
        &self,
        namespace: &str,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;
}
