//! Tubely API Library
//!
//! HTTP handlers, the video ingestion pipeline and application setup.

mod api_doc;
mod utils;

pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use api_doc::{get_openapi_spec, ApiDoc};
pub use error::{ErrorResponse, HttpAppError};
pub use services::{IngestionPipeline, SignedAccessPublisher};
pub use state::{AppState, UploadLimits};
