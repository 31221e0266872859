//! Aspect ratio extraction via ffprobe

use crate::error::ProbeError;
use crate::metadata::aspect_ratio_from_probe;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct MediaInspector {
    ffprobe_path: String,
}

impl MediaInspector {
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Display aspect ratio of the first stream that reports nonzero dimensions.
    ///
    /// Reads the file through a separate handle; callers holding their own handle
    /// should not assume its cursor is unchanged.
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        process.command = "ffprobe",
        ffmpeg.operation = "probe"
    ))]
    pub async fn aspect_ratio(&self, path: &Path) -> Result<String, ProbeError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(
                status = %output.status,
                stderr = %stderr,
                "ffprobe failed"
            );
            return Err(ProbeError::Failed {
                status: output.status,
                stderr,
            });
        }

        let ratio = aspect_ratio_from_probe(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            aspect_ratio = %ratio,
            "Video probe completed"
        );

        Ok(ratio)
    }
}
