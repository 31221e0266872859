//! Request-independent business logic used by the handlers.

pub mod access;
pub mod ingest;
pub mod scratch;
pub mod signing;

pub use access::load_owned_video;
pub use ingest::{validate_video_media_type, IngestionPipeline};
pub use scratch::{ScratchFile, ScratchPath};
pub use signing::SignedAccessPublisher;
