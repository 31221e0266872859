use tubely_core::{AppError, Video};
use uuid::Uuid;

/// Trait for video record storage
#[async_trait::async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Newest first.
    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;

    /// Overwrite the mutable fields of an existing record. `NotFound` if it is gone.
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;

    /// Set only the playable location, leaving every other field as stored.
    async fn set_video_url(&self, id: Uuid, video_url: &str) -> Result<Video, AppError>;

    /// Set only the thumbnail URL, leaving every other field as stored.
    async fn set_thumbnail_url(&self, id: Uuid, thumbnail_url: &str) -> Result<Video, AppError>;
}
