use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Local filesystem storage implementation
///
/// Objects live at `{base_path}/{key}`. When a signing secret is configured, presigned
/// URLs take the form `{base_url}/{key}?expires={unix}&signature={hex}` where the
/// signature is HMAC-SHA256 over `"{namespace}/{key}:{expires}"`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
    namespace: String,
    signing_secret: Option<Vec<u8>>,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/tubely/media")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8091/media")
    /// * `namespace` - Name recorded as the bucket of objects written here
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        namespace: String,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
            namespace,
            signing_secret: None,
        })
    }

    /// Enable presigned URLs using `secret` as the HMAC key.
    pub fn with_signing_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.signing_secret = Some(secret.into());
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path, rejecting keys that could escape the
    /// storage directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.contains('\\')
            || storage_key.starts_with('/')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    fn sign(&self, key: &str, expires: u64) -> StorageResult<String> {
        let secret = self.signing_secret.as_deref().ok_or_else(|| {
            StorageError::ConfigError("Local storage has no signing secret".to_string())
        })?;
        let mut mac = Hmac::<Sha256>::new_from_slice(secret)
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?;
        mac.update(format!("{}/{}:{}", self.namespace, key, expires).as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check a signature produced by [`Storage::presigned_get_url`].
    ///
    /// Returns false for expired links, bad signatures, and when signing is disabled.
    pub fn verify_signature(&self, storage_key: &str, expires: u64, signature: &str) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        if now > expires {
            return false;
        }

        match self.sign(storage_key, expires) {
            Ok(expected) => expected.as_bytes().ct_eq(signature.as_bytes()).into(),
            Err(_) => false,
        }
    }

    /// Open a stored object for streaming, returning the file and its length.
    pub async fn open(&self, storage_key: &str) -> StorageResult<(fs::File, u64)> {
        let path = self.key_to_path(storage_key)?;
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => return Err(StorageError::IoError(e)),
        };
        let len = file.metadata().await?.len();
        Ok((file, len))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }

    fn can_sign(&self, namespace: &str) -> bool {
        namespace == self.namespace
    }

    async fn put_stream(
        &self,
        storage_key: &str,
        _content_type: &str,
        _content_length: Option<u64>,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let size = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage stream upload successful"
        );

        Ok(())
    }

    async fn put_object(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(self.generate_url(storage_key))
    }

    async fn presigned_get_url(
        &self,
        namespace: &str,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if namespace != self.namespace {
            return Err(StorageError::SigningFailed(format!(
                "Unknown local namespace: {}",
                namespace
            )));
        }
        self.key_to_path(storage_key)?;

        let expires = SystemTime::now()
            .checked_add(expires_in)
            .unwrap_or(UNIX_EPOCH)
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let signature = self.sign(storage_key, expires)?;

        Ok(format!(
            "{}?expires={}&signature={}",
            self.generate_url(storage_key),
            expires,
            signature
        ))
    }
}
