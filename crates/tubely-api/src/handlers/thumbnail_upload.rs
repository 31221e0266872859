use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::load_owned_video;
use crate::state::AppState;
use crate::utils::upload::{missing_field, next_field, parse_media_type, read_field_limited};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::constants::THUMBNAIL_FIELD;
use tubely_core::{AppError, VideoResponse};
use tubely_storage::media_type_to_ext;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/thumbnail_upload/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record the thumbnail belongs to")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail stored", body = VideoResponse),
        (status = 400, description = "Missing field or not an image", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    load_owned_video(state.videos.as_ref(), video_id, user.user_id).await?;

    while let Some(field) = next_field(&mut multipart).await? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let media_type = parse_media_type(field.content_type())?;
        if media_type.type_() != mime::IMAGE {
            return Err(AppError::BadRequest(
                "Invalid file type: thumbnail must be an image".to_string(),
            )
            .into());
        }

        let data = read_field_limited(field, state.limits.max_thumbnail_size_bytes).await?;
        let file_name = format!(
            "{}{}",
            video_id,
            media_type_to_ext(media_type.essence_str())
        );
        let url = state
            .assets
            .put_object(&file_name, media_type.essence_str(), data)
            .await?;

        let updated = state
            .videos
            .set_thumbnail_url(video_id, &url)
            .await
            .map_err(|e| AppError::Persist(format!("Couldn't update video: {}", e)))?;

        tracing::info!(video_id = %video_id, file = %file_name, "Thumbnail stored");

        let signed = state.publisher.sign_video(updated).await?;
        return Ok(Json(VideoResponse::from(signed)));
    }

    Err(missing_field(THUMBNAIL_FIELD).into())
}
