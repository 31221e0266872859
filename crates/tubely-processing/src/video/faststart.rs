//! Fast-start remux via ffmpeg

use crate::error::RemuxError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tubely_core::constants::FASTSTART_SUFFIX;

/// `{input}_faststart.mp4`, next to the input.
pub fn faststart_output_path(input: &Path) -> PathBuf {
    let mut output: OsString = input.as_os_str().to_owned();
    output.push(FASTSTART_SUFFIX);
    PathBuf::from(output)
}

#[derive(Debug, Clone)]
pub struct StreamOptimizer {
    ffmpeg_path: String,
}

impl StreamOptimizer {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Copy the streams of `input` into a new MP4 with the index moved to the front.
    ///
    /// No re-encoding takes place. Neither the input nor a partial output is removed.
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        process.command = "ffmpeg",
        ffmpeg.operation = "faststart"
    ))]
    pub async fn faststart(&self, input: &Path) -> Result<PathBuf, RemuxError> {
        let start = std::time::Instant::now();
        let output_path = faststart_output_path(input);

        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(RemuxError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                status = %output.status,
                stderr = %stderr,
                "FFmpeg faststart failed"
            );
            return Err(RemuxError::Failed {
                status: output.status,
                stderr,
            });
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output_path.display(),
            "FFmpeg faststart completed"
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_suffix() {
        assert_eq!(
            faststart_output_path(Path::new("/tmp/tubely-upload-abc.mp4")),
            PathBuf::from("/tmp/tubely-upload-abc.mp4_faststart.mp4")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_returns_output_path() {
        let optimizer = StreamOptimizer::new("true");
        let input = Path::new("/tmp/in.mp4");
        let out = optimizer.faststart(input).await.unwrap();
        assert_eq!(out, faststart_output_path(input));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let optimizer = StreamOptimizer::new("false");
        let result = optimizer.faststart(Path::new("/tmp/in.mp4")).await;
        assert!(matches!(result, Err(RemuxError::Failed { .. })));
    }

    #[tokio::test]
    async fn test_missing_binary_is_error() {
        let optimizer = StreamOptimizer::new("/nonexistent/ffmpeg");
        let result = optimizer.faststart(Path::new("/tmp/in.mp4")).await;
        assert!(matches!(result, Err(RemuxError::Spawn(_))));
    }
}
