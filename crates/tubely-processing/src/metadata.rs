//! Shape of `ffprobe -print_format json -show_streams` output.

use crate::error::ProbeError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeOutput {
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub width: Option<u64>,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub display_aspect_ratio: Option<String>,
}

impl ProbeStream {
    fn has_dimensions(&self) -> bool {
        self.width.unwrap_or(0) > 0 && self.height.unwrap_or(0) > 0
    }
}

/// Display aspect ratio of the first stream with nonzero width and height.
///
/// A stream with dimensions but no `display_aspect_ratio` yields an empty string,
/// which classifies as `other`.
pub fn aspect_ratio_from_probe(stdout: &[u8]) -> Result<String, ProbeError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;

    output
        .streams
        .into_iter()
        .find(ProbeStream::has_dimensions)
        .map(|stream| stream.display_aspect_ratio.unwrap_or_default())
        .ok_or(ProbeError::NoVideoStream)
}
