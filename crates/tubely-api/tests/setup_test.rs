//! Service wiring tests.
//!
//! Run with: `cargo test -p tubely-api --test setup_test`

mod helpers;

use helpers::fixtures::sample_mp4;
use helpers::test_config;
use std::sync::Arc;
use tubely_api::setup::services::build_video_storage;
use tubely_core::StorageBackend;
use tubely_storage::Storage;

#[tokio::test]
async fn test_local_backend_is_shared_with_media_route() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.storage_backend = StorageBackend::Local;
    config.local_storage_path = Some(dir.path().join("media").to_string_lossy().into_owned());
    config.local_storage_base_url = Some("http://localhost:8091/media".to_string());

    let (storage, media_files) = build_video_storage(&config).await.unwrap();
    let media = media_files.expect("local backend serves /media");

    assert!(std::ptr::eq(
        Arc::as_ptr(&storage) as *const u8,
        Arc::as_ptr(&media) as *const u8
    ));
    assert_eq!(storage.namespace(), "local");

    storage
        .put_object("landscape/a.mp4", "video/mp4", sample_mp4())
        .await
        .unwrap();
    let (_, len) = media.open("landscape/a.mp4").await.unwrap();
    assert_eq!(len, sample_mp4().len() as u64);
}

#[tokio::test]
async fn test_s3_backend_has_no_media_route() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let (storage, media_files) = build_video_storage(&config).await.unwrap();

    assert!(media_files.is_none());
    assert_eq!(storage.namespace(), helpers::TEST_BUCKET);
}
