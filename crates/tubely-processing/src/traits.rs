use crate::error::{ProbeError, RemuxError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The two external tool operations the ingestion pipeline depends on.
///
/// Implemented by [`crate::FfmpegToolchain`] in production and by fakes in tests.
#[async_trait]
pub trait MediaToolchain: Send + Sync {
    /// Display aspect ratio (e.g. `"16:9"`) of the file at `path`.
    async fn probe(&self, path: &Path) -> Result<String, ProbeError>;

    /// Write a fast-start copy of `path` and return where it was written.
    ///
    /// The output location is always [`crate::faststart_output_path`] of the input.
    /// The input is left in place.
    async fn remux(&self, path: &Path) -> Result<PathBuf, RemuxError>;
}
