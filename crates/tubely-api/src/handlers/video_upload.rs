use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::validate_video_media_type;
use crate::state::AppState;
use crate::utils::upload::{field_reader, missing_field, next_field};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::constants::VIDEO_FIELD;
use tubely_core::VideoResponse;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record to attach the upload to")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video published", body = VideoResponse),
        (status = 400, description = "Missing field or unsupported media type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Processing or persistence failure", body = ErrorResponse),
        (status = 502, description = "Object store rejected the upload", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video = state.ingest.authorize(video_id, user.user_id).await?;

    tracing::info!(video_id = %video_id, user_id = %user.user_id, "Uploading video");

    while let Some(field) = next_field(&mut multipart).await? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let media_type = validate_video_media_type(field.content_type())?;
        let updated = state
            .ingest
            .ingest(video, &media_type, field_reader(field))
            .await?;
        let signed = state.publisher.sign_video(updated).await?;

        return Ok(Json(VideoResponse::from(signed)));
    }

    Err(missing_field(VIDEO_FIELD).into())
}
