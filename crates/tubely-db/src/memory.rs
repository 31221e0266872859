use crate::repository::VideoRepository;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tubely_core::{AppError, Video};
use uuid::Uuid;

/// Map-backed repository.
///
/// `set_fail_updates(true)` makes every write after creation fail with a database error
/// while leaving stored records untouched.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, Video>>,
    fail_updates: AtomicBool,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    async fn modify(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut Video),
    ) -> Result<Video, AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }

        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
        apply(stored);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[async_trait::async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::BadRequest(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(video.clone())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .await
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        self.modify(video.id, |stored| {
            stored.title = video.title.clone();
            stored.description = video.description.clone();
            stored.thumbnail_url = video.thumbnail_url.clone();
            stored.video_url = video.video_url.clone();
        })
        .await
    }

    async fn set_video_url(&self, id: Uuid, video_url: &str) -> Result<Video, AppError> {
        self.modify(id, |stored| stored.video_url = Some(video_url.to_string()))
            .await
    }

    async fn set_thumbnail_url(&self, id: Uuid, thumbnail_url: &str) -> Result<Video, AppError> {
        self.modify(id, |stored| {
            stored.thumbnail_url = Some(thumbnail_url.to_string())
        })
        .await
    }
}
