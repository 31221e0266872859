//! OpenAPI documentation.

use crate::error::ErrorResponse;
use crate::handlers;
use tubely_core::VideoResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::healthz,
        handlers::video_get::list_videos,
        handlers::video_get::get_video,
        handlers::video_upload::upload_video,
        handlers::thumbnail_upload::upload_thumbnail,
    ),
    components(schemas(VideoResponse, ErrorResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "videos", description = "Video records, uploads and playback links"),
        (name = "health", description = "Liveness")
    ),
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video ingestion and signed playback"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_upload_routes() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/videos/{video_id}"));
        assert!(spec.paths.paths.contains_key("/api/thumbnail_upload/{video_id}"));
        assert!(spec
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
