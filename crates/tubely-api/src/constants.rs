//! HTTP surface constants.

/// Prefix for every JSON API route.
pub const API_PREFIX: &str = "/api";

/// Public prefix for thumbnails written to `ASSETS_ROOT`.
pub const ASSETS_PREFIX: &str = "/assets";

/// Public prefix for signed local-backend video downloads.
pub const MEDIA_PREFIX: &str = "/media";

/// Headroom added to upload size limits for multipart framing.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
