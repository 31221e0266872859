//! Video ingestion pipeline
//!
//! Upload bytes are buffered to a private temp file, probed for their aspect ratio,
//! remuxed for fast start, published under `{class}/{asset_name}` and finally recorded
//! on the video row. Each step is terminal on failure; nothing is retried.
//!
//! Publishing and the record update are not transactional. If the update fails after a
//! successful publish the object stays in the store unreferenced; this is logged at
//! `warn` with the orphaned key and is not cleaned up.

use crate::services::access::load_owned_video;
use crate::services::scratch::{ScratchFile, ScratchPath};
use std::io::SeekFrom;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tubely_core::constants::{ACCEPTED_VIDEO_TYPE, PUBLISH_TIMEOUT};
use tubely_core::{AppError, AspectClass, StorageLocation, Video};
use tubely_db::VideoRepository;
use tubely_processing::{faststart_output_path, MediaToolchain};
use tubely_storage::{generate_asset_name, generate_storage_key, Storage};
use uuid::Uuid;

/// Normalized media type of a video upload. Only `video/mp4` is accepted.
pub fn validate_video_media_type(content_type: Option<&str>) -> Result<String, AppError> {
    let content_type = content_type
        .ok_or_else(|| AppError::BadRequest("Missing Content-Type for video".to_string()))?;

    let parsed: mime::Mime = content_type
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid Content-Type".to_string()))?;

    if parsed.essence_str() != ACCEPTED_VIDEO_TYPE {
        return Err(AppError::BadRequest(format!(
            "Invalid file type: only {} is allowed",
            ACCEPTED_VIDEO_TYPE
        )));
    }

    Ok(parsed.essence_str().to_string())
}

#[derive(Clone)]
pub struct IngestionPipeline {
    repository: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    toolchain: Arc<dyn MediaToolchain>,
    scratch_dir: PathBuf,
    max_upload_bytes: u64,
    publish_timeout: Duration,
}

impl IngestionPipeline {
    pub fn new(
        repository: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
        toolchain: Arc<dyn MediaToolchain>,
        scratch_dir: PathBuf,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            repository,
            storage,
            toolchain,
            scratch_dir,
            max_upload_bytes,
            publish_timeout: PUBLISH_TIMEOUT,
        }
    }

    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    /// Resolve the record the caller wants to upload to.
    pub async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, AppError> {
        load_owned_video(self.repository.as_ref(), video_id, user_id).await
    }

    /// Buffer `reader` and run the rest of the pipeline on a detached task.
    ///
    /// `media_type` must already have passed [`validate_video_media_type`]. Once the
    /// upload is buffered, dropping the returned future no longer stops processing.
    pub async fn ingest<R>(&self, video: Video, media_type: &str, reader: R) -> Result<Video, AppError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let scratch = self.buffer(reader).await?;

        let pipeline = self.clone();
        let media_type = media_type.to_string();
        let handle =
            tokio::spawn(async move { pipeline.process(video, &media_type, scratch).await });

        handle.await.map_err(|e| {
            tracing::error!(error = %e, "Ingestion task failed");
            AppError::Internal(format!("Ingestion task failed: {}", e))
        })?
    }

    /// Copy the upload into a private temp file, enforcing the size limit.
    pub async fn buffer<R>(&self, reader: R) -> Result<ScratchFile, AppError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut scratch = ScratchFile::create_in(&self.scratch_dir)
            .map_err(|e| AppError::Io(format!("Couldn't create temp file: {}", e)))?;

        // One byte past the limit is enough to tell an oversized upload apart.
        let mut limited = reader.take(self.max_upload_bytes + 1);
        let written = tokio::io::copy(&mut limited, scratch.file_mut())
            .await
            .map_err(|e| AppError::Io(format!("Couldn't write temp file: {}", e)))?;

        if written > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {} MB",
                self.max_upload_bytes / 1024 / 1024
            )));
        }

        scratch
            .file_mut()
            .flush()
            .await
            .map_err(|e| AppError::Io(format!("Couldn't write temp file: {}", e)))?;

        tracing::debug!(
            path = %scratch.path().display(),
            size_bytes = written,
            "Upload buffered"
        );

        Ok(scratch)
    }

    /// Inspect, optimize, publish and commit an already-buffered upload.
    #[tracing::instrument(skip_all, fields(video_id = %video.id))]
    pub async fn process(
        &self,
        video: Video,
        media_type: &str,
        mut scratch: ScratchFile,
    ) -> Result<Video, AppError> {
        let start = std::time::Instant::now();

        let ratio = self.toolchain.probe(scratch.path()).await.map_err(|e| {
            tracing::warn!(error = %e, "Couldn't read video aspect ratio");
            AppError::Io(format!("Couldn't read video aspect ratio: {}", e))
        })?;

        let offset = scratch
            .file_mut()
            .seek(SeekFrom::Start(0))
            .await
            .map_err(|e| AppError::Io(format!("Couldn't reset file pointer: {}", e)))?;
        if offset != 0 {
            return Err(AppError::Io(format!(
                "Couldn't reset file pointer: position {}",
                offset
            )));
        }

        // Guard the output before ffmpeg runs so partial output is removed too.
        let optimized = ScratchPath::new(faststart_output_path(scratch.path()));
        let remuxed_path = self.toolchain.remux(scratch.path()).await.map_err(|e| {
            tracing::warn!(error = %e, "Couldn't optimize video for fast start");
            AppError::Io(format!("Couldn't process video: {}", e))
        })?;
        let _remuxed = (remuxed_path != optimized.path())
            .then(|| ScratchPath::new(remuxed_path.clone()));

        let optimized_file = tokio::fs::File::open(&remuxed_path)
            .await
            .map_err(|e| AppError::Io(format!("Couldn't open processed file: {}", e)))?;
        let content_length = optimized_file
            .metadata()
            .await
            .map_err(|e| AppError::Io(format!("Couldn't open processed file: {}", e)))?
            .len();

        let class = AspectClass::from_ratio(&ratio);
        let key = generate_storage_key(class, &generate_asset_name(media_type));

        self.publish(&key, media_type, content_length, optimized_file)
            .await?;

        // Only the location is written; fields changed since authorize are kept.
        let location = StorageLocation::new(self.storage.namespace(), &key)?;
        let updated = match self
            .repository
            .set_video_url(video.id, &location.encode())
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %location.bucket,
                    orphaned_key = %key,
                    "Video published but record update failed; stored object is orphaned"
                );
                return Err(AppError::Persist(format!("Couldn't update video: {}", e)));
            }
        };

        tracing::info!(
            key = %key,
            aspect_ratio = %ratio,
            aspect_class = %class,
            size_bytes = content_length,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video ingested"
        );

        Ok(updated)
    }

    async fn publish(
        &self,
        key: &str,
        media_type: &str,
        content_length: u64,
        file: tokio::fs::File,
    ) -> Result<(), AppError> {
        let put = self
            .storage
            .put_stream(key, media_type, Some(content_length), Box::pin(file));

        match tokio::time::timeout(self.publish_timeout, put).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(AppError::Publish(format!(
                "Error uploading file to storage: {}",
                e
            ))),
            Err(_) => {
                tracing::warn!(
                    key = %key,
                    timeout_secs = self.publish_timeout.as_secs_f64(),
                    "Publish deadline exceeded"
                );
                Err(AppError::Publish(format!(
                    "Upload to storage timed out after {:?}",
                    self.publish_timeout
                )))
            }
        }
    }
}
