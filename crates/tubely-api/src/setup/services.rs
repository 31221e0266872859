//! Wiring of repositories, storage backends and the media toolchain into `AppState`.

use crate::services::{IngestionPipeline, SignedAccessPublisher};
use crate::state::{AppState, UploadLimits};
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use tubely_core::{Config, StorageBackend};
use tubely_db::{PgVideoRepository, VideoRepository};
use tubely_processing::{FfmpegToolchain, MediaToolchain};
use tubely_storage::{
    create_assets_storage, create_local_storage, create_storage, LocalStorage, Storage,
};

pub async fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let videos: Arc<dyn VideoRepository> = Arc::new(PgVideoRepository::new(pool));

    let (storage, media_files) = build_video_storage(config).await?;
    let assets = create_assets_storage(config)
        .await
        .context("Failed to initialize thumbnail storage")?;

    tokio::fs::create_dir_all(&config.scratch_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create scratch directory {}",
                config.scratch_dir.display()
            )
        })?;

    let toolchain: Arc<dyn MediaToolchain> = Arc::new(FfmpegToolchain::new(
        config.ffprobe_path.clone(),
        config.ffmpeg_path.clone(),
    ));

    tracing::info!(
        bucket = %storage.namespace(),
        backend = %storage.backend_type(),
        assets_root = %config.assets_root.display(),
        scratch_dir = %config.scratch_dir.display(),
        ffprobe_path = %config.ffprobe_path,
        ffmpeg_path = %config.ffmpeg_path,
        "Services initialized"
    );

    Ok(Arc::new(build_state(
        config,
        videos,
        storage,
        assets,
        media_files,
        toolchain,
    )))
}

/// Backend that published videos go to, plus the same backend as `LocalStorage` when
/// videos are served from `/media`.
pub async fn build_video_storage(
    config: &Config,
) -> Result<(Arc<dyn Storage>, Option<Arc<LocalStorage>>)> {
    match config.storage_backend {
        StorageBackend::Local => {
            let local = Arc::new(
                create_local_storage(config)
                    .await
                    .context("Failed to initialize local media storage")?,
            );
            let storage: Arc<dyn Storage> = local.clone();
            Ok((storage, Some(local)))
        }
        StorageBackend::S3 => {
            let storage = create_storage(config)
                .await
                .context("Failed to initialize video storage")?;
            Ok((storage, None))
        }
    }
}

/// Assemble `AppState` from already-constructed collaborators.
pub fn build_state(
    config: &Config,
    videos: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    assets: Arc<dyn Storage>,
    media_files: Option<Arc<LocalStorage>>,
    toolchain: Arc<dyn MediaToolchain>,
) -> AppState {
    let ingest = IngestionPipeline::new(
        videos.clone(),
        storage.clone(),
        toolchain,
        config.scratch_dir.clone(),
        config.max_video_size_bytes as u64,
    );

    AppState {
        videos,
        ingest,
        publisher: SignedAccessPublisher::new(storage),
        assets,
        media_files,
        limits: UploadLimits {
            max_video_size_bytes: config.max_video_size_bytes,
            max_thumbnail_size_bytes: config.max_thumbnail_size_bytes,
        },
    }
}
