//! Signed downloads for videos published to the local backend.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tubely_core::AppError;

#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    expires: u64,
    signature: String,
}

fn content_type_for(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext) {
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}

pub async fn serve_media(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<SignedQuery>,
) -> Result<Response, HttpAppError> {
    let Some(local) = state.media_files.as_ref() else {
        return Err(AppError::NotFound("Local media serving is disabled".to_string()).into());
    };

    if !local.verify_signature(&key, query.expires, &query.signature) {
        tracing::debug!(key = %key, "Rejected media request with invalid or expired signature");
        return Err(AppError::Forbidden("Invalid or expired link".to_string()).into());
    }

    let (file, len) = local.open(&key).await?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&key).to_string()),
            (header::CONTENT_LENGTH, len.to_string()),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
