//! In-memory object store that records every call.

use async_trait::async_trait;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tubely_storage::{Storage, StorageBackend, StorageError, StorageResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignCall {
    pub namespace: String,
    pub key: String,
    pub expires_in: Duration,
}

pub struct RecordingStorage {
    namespace: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    presigns: Mutex<Vec<PresignCall>>,
    put_calls: AtomicUsize,
    fail_puts: AtomicBool,
    put_delay: Mutex<Option<Duration>>,
}

impl RecordingStorage {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            objects: Mutex::new(HashMap::new()),
            presigns: Mutex::new(Vec::new()),
            put_calls: AtomicUsize::new(0),
            fail_puts: AtomicBool::new(false),
            put_delay: Mutex::new(None),
        }
    }

    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make every put sleep before completing.
    pub fn set_put_delay(&self, delay: Duration) {
        *self.put_delay.lock().unwrap() = Some(delay);
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn presigns(&self) -> Vec<PresignCall> {
        self.presigns.lock().unwrap().clone()
    }

    async fn before_put(&self) -> StorageResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.put_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("access denied".to_string()));
        }
        Ok(())
    }

    fn insert(&self, key: &str, content_type: &str, data: Vec<u8>) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                data,
            },
        );
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }

    async fn put_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        _content_length: Option<u64>,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()> {
        self.before_put().await?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.insert(storage_key, content_type, data);
        Ok(())
    }

    async fn put_object(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        self.before_put().await?;
        self.insert(storage_key, content_type, data);
        Ok(format!("https://objects.example/{}/{}", self.namespace, storage_key))
    }

    async fn presigned_get_url(
        &self,
        namespace: &str,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.presigns.lock().unwrap().push(PresignCall {
            namespace: namespace.to_string(),
            key: storage_key.to_string(),
            expires_in,
        });
        Ok(format!(
            "https://signed.example/{}/{}?expires_in={}",
            namespace,
            storage_key,
            expires_in.as_secs()
        ))
    }
}
