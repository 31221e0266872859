//! ffprobe / ffmpeg invocation

pub mod faststart;
pub mod probe;

pub use faststart::{faststart_output_path, StreamOptimizer};
pub use probe::MediaInspector;

use crate::error::{ProbeError, RemuxError};
use crate::traits::MediaToolchain;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Production toolchain backed by the ffprobe and ffmpeg binaries.
#[derive(Debug, Clone)]
pub struct FfmpegToolchain {
    inspector: MediaInspector,
    optimizer: StreamOptimizer,
}

impl FfmpegToolchain {
    pub fn new(ffprobe_path: impl Into<String>, ffmpeg_path: impl Into<String>) -> Self {
        Self {
            inspector: MediaInspector::new(ffprobe_path),
            optimizer: StreamOptimizer::new(ffmpeg_path),
        }
    }
}

#[async_trait]
impl MediaToolchain for FfmpegToolchain {
    async fn probe(&self, path: &Path) -> Result<String, ProbeError> {
        self.inspector.aspect_ratio(path).await
    }

    async fn remux(&self, path: &Path) -> Result<PathBuf, RemuxError> {
        self.optimizer.faststart(path).await
    }
}
