//! Common utilities for file upload handlers

use axum::extract::multipart::{Field, Multipart};
use futures::TryStreamExt;
use std::pin::Pin;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;
use tubely_core::AppError;

/// Next multipart field, with read failures reported as `BadRequest`.
pub async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>, AppError> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart: {}", e)))
}

/// Error for a form that ended without the expected field.
pub fn missing_field(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing multipart field '{}'", name))
}

/// Stream a multipart field's body as an `AsyncRead`.
pub fn field_reader<'a>(field: Field<'a>) -> Pin<Box<dyn AsyncRead + Send + 'a>> {
    Box::pin(StreamReader::new(field.map_err(std::io::Error::other)))
}

/// Read a small field fully, rejecting bodies above `max_size` bytes.
pub async fn read_field_limited(mut field: Field<'_>, max_size: usize) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?
    {
        if data.len() + chunk.len() > max_size {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {} MB",
                max_size / 1024 / 1024
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Parse a declared content type, returning its normalized `type/subtype`.
pub fn parse_media_type(content_type: Option<&str>) -> Result<mime::Mime, AppError> {
    let content_type = content_type
        .ok_or_else(|| AppError::BadRequest("Missing Content-Type for file".to_string()))?;
    content_type
        .parse::<mime::Mime>()
        .map_err(|_| AppError::BadRequest("Invalid Content-Type".to_string()))
}
