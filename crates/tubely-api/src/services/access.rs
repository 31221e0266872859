use tubely_core::{AppError, Video};
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Fetch a record the caller owns: `NotFound` when absent, `Forbidden` for other owners.
pub async fn load_owned_video(
    repository: &dyn VideoRepository,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, AppError> {
    let video = repository
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Couldn't find video {}", video_id)))?;

    if !video.is_owned_by(user_id) {
        tracing::debug!(video_id = %video_id, user_id = %user_id, "Caller does not own video");
        return Err(AppError::Forbidden(
            "Not authorized to access this video".to_string(),
        ));
    }

    Ok(video)
}
