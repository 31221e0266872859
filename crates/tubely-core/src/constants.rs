//! Pipeline-wide constants.

use std::time::Duration;

/// The only media type accepted by the video upload endpoint.
pub const ACCEPTED_VIDEO_TYPE: &str = "video/mp4";

/// Multipart field carrying the video bytes.
pub const VIDEO_FIELD: &str = "video";

/// Multipart field carrying the thumbnail bytes.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Deadline for a single object-store publish.
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(30);

/// Validity window of playback links handed to clients.
pub const PLAYBACK_URL_TTL: Duration = Duration::from_secs(5 * 60);

/// Suffix appended to the buffered upload path for the fast-start output.
pub const FASTSTART_SUFFIX: &str = "_faststart.mp4";

/// Bytes of entropy behind every asset identifier.
pub const ASSET_ID_BYTES: usize = 32;

/// Extension used when a media type has no usable subtype.
pub const FALLBACK_EXTENSION: &str = ".bin";

/// Issuer embedded in access tokens.
pub const TOKEN_ISSUER: &str = "tubely-access";
