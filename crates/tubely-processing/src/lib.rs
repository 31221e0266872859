//! Tubely Processing Library
//!
//! Wrappers around the external media tools used during ingestion: `ffprobe` to read the
//! display aspect ratio and `ffmpeg` to move the MP4 index to the front of the file
//! (fast start) without re-encoding.

pub mod error;
pub mod metadata;
pub mod traits;
pub mod video;

pub use error::{ProbeError, RemuxError};
pub use metadata::{aspect_ratio_from_probe, ProbeOutput, ProbeStream};
pub use traits::MediaToolchain;
pub use video::{faststart_output_path, FfmpegToolchain, MediaInspector, StreamOptimizer};
