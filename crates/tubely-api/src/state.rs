//! Application state shared by every handler.

use crate::services::{IngestionPipeline, SignedAccessPublisher};
use std::sync::Arc;
use tubely_db::VideoRepository;
use tubely_storage::{LocalStorage, Storage};

/// Size limits applied to uploads.
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoRepository>,
    pub ingest: IngestionPipeline,
    pub publisher: SignedAccessPublisher,
    /// Thumbnail store, publicly served under `/assets`.
    pub assets: Arc<dyn Storage>,
    /// Set when videos are published to the local backend; serves `/media`.
    pub media_files: Option<Arc<LocalStorage>>,
    pub limits: UploadLimits,
}
