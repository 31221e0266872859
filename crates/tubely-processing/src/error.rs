use std::process::ExitStatus;
use thiserror::Error;

/// Failure to read stream information from a media file.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to execute ffprobe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffprobe exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("Failed to parse ffprobe output: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    #[error("No stream with valid dimensions found")]
    NoVideoStream,
}

/// Failure to rewrite a file for fast start.
#[derive(Debug, Error)]
pub enum RemuxError {
    #[error("Failed to execute ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}
