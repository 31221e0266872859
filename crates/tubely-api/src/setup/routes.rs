//! Route configuration and setup

use crate::auth::{auth_middleware, AuthState};
use crate::constants::{API_PREFIX, ASSETS_PREFIX, MEDIA_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
    });

    let protected = protected_routes(state.clone()).layer(axum::middleware::from_fn_with_state(
        auth_state,
        auth_middleware,
    ));

    let api = public_routes(state.clone()).merge(protected);

    let app = Router::new()
        .nest(API_PREFIX, api)
        .route(
            &format!("{}/{{*key}}", MEDIA_PREFIX),
            get(handlers::media::serve_media),
        )
        .nest_service(ASSETS_PREFIX, ServeDir::new(&config.assets_root))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes(_state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route(
            "/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let video_upload_limit = state.limits.max_video_size_bytes + MULTIPART_OVERHEAD_BYTES;
    let thumbnail_upload_limit = state.limits.max_thumbnail_size_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/videos", get(handlers::video_get::list_videos))
        .route(
            "/videos/{video_id}",
            get(handlers::video_get::get_video).post(
                handlers::video_upload::upload_video
                    .layer(DefaultBodyLimit::max(video_upload_limit)),
            ),
        )
        .route(
            "/thumbnail_upload/{video_id}",
            post(
                handlers::thumbnail_upload::upload_thumbnail
                    .layer(DefaultBodyLimit::max(thumbnail_upload_limit)),
            ),
        )
}
