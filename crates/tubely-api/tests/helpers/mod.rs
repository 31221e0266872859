//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in-process: records live in [`InMemoryVideoRepository`], published
//! objects in [`RecordingStorage`] and the media tools are replaced by [`FakeToolchain`].

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod storage;
pub mod toolchain;

use axum_test::TestServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::constants;
use tubely_api::services::IngestionPipeline;
use tubely_api::setup::{routes, services};
use tubely_core::{Config, StorageBackend, Video};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_processing::MediaToolchain;
use tubely_storage::{create_assets_storage, LocalStorage, Storage};
use uuid::Uuid;

pub use storage::RecordingStorage;
pub use toolchain::FakeToolchain;

pub const TEST_BUCKET: &str = "tubely-test";

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub fn test_config(root: &Path) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        log_format: "text".to_string(),
        jwt_secret: auth::TEST_JWT_SECRET.to_string(),
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        storage_backend: StorageBackend::S3,
        s3_bucket: Some(TEST_BUCKET.to_string()),
        s3_region: Some("us-east-1".to_string()),
        s3_endpoint: None,
        local_storage_path: None,
        local_storage_base_url: None,
        local_storage_namespace: "local".to_string(),
        local_signing_secret: "local-signing-secret".to_string(),
        assets_root: root.join("assets"),
        public_base_url: "http://localhost:8091".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        ffmpeg_path: "ffmpeg".to_string(),
        scratch_dir: root.join("scratch"),
        max_video_size_bytes: 1024 * 1024,
        max_thumbnail_size_bytes: 64 * 1024,
    }
}

/// Number of files left in a scratch directory.
pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}

/// Test application: server plus handles on every fake behind it.
pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
    pub videos: Arc<InMemoryVideoRepository>,
    pub storage: Arc<RecordingStorage>,
    pub toolchain: Arc<FakeToolchain>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.config.scratch_dir
    }

    pub fn scratch_entries(&self) -> usize {
        count_entries(&self.config.scratch_dir)
    }

    pub async fn create_video(&self, owner: Uuid, title: &str) -> Video {
        self.videos
            .create_video(&Video::new(owner, title))
            .await
            .expect("Failed to create video record")
    }

    pub async fn stored_video(&self, id: Uuid) -> Video {
        self.videos
            .get_video(id)
            .await
            .expect("Failed to load video record")
            .expect("Video record missing")
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(FakeToolchain::landscape(), |_| {}).await
}

/// Build the full router over fakes. `configure` may adjust the config before wiring.
pub async fn setup_test_app_with(
    toolchain: FakeToolchain,
    configure: impl FnOnce(&mut Config),
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = test_config(temp_dir.path());
    configure(&mut config);
    std::fs::create_dir_all(&config.scratch_dir).expect("Failed to create scratch dir");

    let videos = Arc::new(InMemoryVideoRepository::new());
    let storage = Arc::new(RecordingStorage::new(TEST_BUCKET));
    let toolchain = Arc::new(toolchain);
    let assets = create_assets_storage(&config)
        .await
        .expect("Failed to create assets storage");

    let state = services::build_state(
        &config,
        videos.clone(),
        storage.clone(),
        assets,
        None,
        toolchain.clone(),
    );
    let app = routes::setup_routes(&config, Arc::new(state)).expect("Failed to build routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        config,
        videos,
        storage,
        toolchain,
        _temp_dir: temp_dir,
    }
}

/// Router whose videos are published to signed local storage and served under `/media`.
pub struct LocalMediaApp {
    pub server: TestServer,
    pub videos: Arc<InMemoryVideoRepository>,
    pub media: Arc<LocalStorage>,
    pub _temp_dir: TempDir,
}

pub async fn setup_local_media_app() -> LocalMediaApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = test_config(temp_dir.path());
    config.storage_backend = StorageBackend::Local;
    std::fs::create_dir_all(&config.scratch_dir).expect("Failed to create scratch dir");

    let media = Arc::new(
        LocalStorage::new(
            temp_dir.path().join("media"),
            "http://localhost:8091/media".to_string(),
            "local".to_string(),
        )
        .await
        .expect("Failed to create local storage")
        .with_signing_secret(config.local_signing_secret.clone()),
    );
    let assets = create_assets_storage(&config)
        .await
        .expect("Failed to create assets storage");
    let videos = Arc::new(InMemoryVideoRepository::new());
    let toolchain: Arc<dyn MediaToolchain> = Arc::new(FakeToolchain::landscape());

    let state = services::build_state(
        &config,
        videos.clone(),
        media.clone(),
        assets,
        Some(media.clone()),
        toolchain,
    );
    let app = routes::setup_routes(&config, Arc::new(state)).expect("Failed to build routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    LocalMediaApp {
        server,
        videos,
        media,
        _temp_dir: temp_dir,
    }
}

/// Ingestion pipeline over fakes, without the HTTP layer.
pub struct PipelineHarness {
    pub pipeline: IngestionPipeline,
    pub videos: Arc<InMemoryVideoRepository>,
    pub storage: Arc<RecordingStorage>,
    pub toolchain: Arc<FakeToolchain>,
    pub scratch_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl PipelineHarness {
    pub fn new(toolchain: FakeToolchain) -> Self {
        Self::with_limit(toolchain, 1024 * 1024)
    }

    pub fn with_limit(toolchain: FakeToolchain, max_upload_bytes: u64) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let scratch_dir = temp_dir.path().join("scratch");
        std::fs::create_dir_all(&scratch_dir).expect("Failed to create scratch dir");

        let videos = Arc::new(InMemoryVideoRepository::new());
        let storage = Arc::new(RecordingStorage::new(TEST_BUCKET));
        let toolchain = Arc::new(toolchain);
        let pipeline = IngestionPipeline::new(
            videos.clone(),
            storage.clone(),
            toolchain.clone(),
            scratch_dir.clone(),
            max_upload_bytes,
        );

        Self {
            pipeline,
            videos,
            storage,
            toolchain,
            scratch_dir,
            _temp_dir: temp_dir,
        }
    }

    pub fn scratch_entries(&self) -> usize {
        count_entries(&self.scratch_dir)
    }

    pub async fn create_video(&self, owner: Uuid) -> Video {
        self.videos
            .create_video(&Video::new(owner, "clip"))
            .await
            .expect("Failed to create video record")
    }

    pub async fn stored_video(&self, id: Uuid) -> Video {
        self.videos
            .get_video(id)
            .await
            .expect("Failed to load video record")
            .expect("Video record missing")
    }
}
