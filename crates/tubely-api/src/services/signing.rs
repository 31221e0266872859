//! Turns stored playable locations into short-lived download URLs at read time.

use crate::error::storage_error_to_app;
use std::sync::Arc;
use std::time::Duration;
use tubely_core::constants::PLAYBACK_URL_TTL;
use tubely_core::{AppError, Video};
use tubely_storage::Storage;

#[derive(Clone)]
pub struct SignedAccessPublisher {
    storage: Arc<dyn Storage>,
    ttl: Duration,
}

impl SignedAccessPublisher {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            ttl: PLAYBACK_URL_TTL,
        }
    }

    /// Presigned GET URL for one object. No request reaches the store.
    pub async fn generate_presigned_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, AppError> {
        self.storage
            .presigned_get_url(bucket, key, expires_in)
            .await
            .map_err(storage_error_to_app)
    }

    /// Replace the record's stored location with a playback URL.
    ///
    /// Records without a location, whose location does not decode into a bucket and a
    /// key, or whose bucket the backend cannot sign for (e.g. written before a switch
    /// from S3 to local storage) are returned unchanged.
    pub async fn sign_video(&self, mut video: Video) -> Result<Video, AppError> {
        let Some(location) = video.playable_location() else {
            return Ok(video);
        };
        if !self.storage.can_sign(&location.bucket) {
            tracing::warn!(
                video_id = %video.id,
                bucket = %location.bucket,
                "Stored location is outside the configured backend; returning it unsigned"
            );
            return Ok(video);
        }

        let url = self
            .generate_presigned_url(&location.bucket, &location.key, self.ttl)
            .await?;
        video.video_url = Some(url);
        Ok(video)
    }

    pub async fn sign_videos(&self, videos: Vec<Video>) -> Result<Vec<Video>, AppError> {
        let mut signed = Vec::with_capacity(videos.len());
        for video in videos {
            signed.push(self.sign_video(video).await?);
        }
        Ok(signed)
    }
}
