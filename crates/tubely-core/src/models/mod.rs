//! Domain models

pub mod aspect;
pub mod storage;
pub mod video;

pub use aspect::AspectClass;
pub use storage::StorageLocation;
pub use video::{Video, VideoResponse};
