//! Storage location model: where a published object lives.
//!
//! At rest the location is packed into a single text column as `"{bucket},{key}"`.
//! `encode`/`decode` are the only place that format is produced or read.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const SEPARATOR: char = ',';

/// A reference to a published object: storage namespace (bucket) plus object key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub bucket: String,
    pub key: String,
}

impl StorageLocation {
    /// Build a location, rejecting empty components or components that would not survive
    /// a round trip through `encode`/`decode`.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self, AppError> {
        let bucket = bucket.into();
        let key = key.into();
        if bucket.is_empty() || key.is_empty() {
            return Err(AppError::Internal(
                "Storage location requires a bucket and a key".to_string(),
            ));
        }
        if bucket.contains(SEPARATOR) || key.contains(SEPARATOR) {
            return Err(AppError::Internal(format!(
                "Storage location component contains '{}'",
                SEPARATOR
            )));
        }
        Ok(Self { bucket, key })
    }

    pub fn encode(&self) -> String {
        format!("{}{}{}", self.bucket, SEPARATOR, self.key)
    }

    /// Decode a persisted location. Returns `None` unless the value holds exactly two
    /// non-empty components.
    pub fn decode(raw: &str) -> Option<Self> {
        let mut parts = raw.split(SEPARATOR);
        let bucket = parts.next()?;
        let key = parts.next()?;
        if parts.next().is_some() || bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let loc = StorageLocation::new("tubely-media", "landscape/abc_DEF-123.mp4").unwrap();
        assert_eq!(loc.encode(), "tubely-media,landscape/abc_DEF-123.mp4");
        assert_eq!(StorageLocation::decode(&loc.encode()), Some(loc));
    }

    #[test]
    fn test_decode_rejects_wrong_component_count() {
        assert_eq!(StorageLocation::decode(""), None);
        assert_eq!(StorageLocation::decode("bucket"), None);
        assert_eq!(StorageLocation::decode("a,b,c"), None);
        assert_eq!(
            StorageLocation::decode("https://example.com/video.mp4"),
            None
        );
    }

    #[test]
    fn test_decode_rejects_empty_components() {
        assert_eq!(StorageLocation::decode(",key"), None);
        assert_eq!(StorageLocation::decode("bucket,"), None);
        assert_eq!(StorageLocation::decode(","), None);
    }

    #[test]
    fn test_new_rejects_unencodable_parts() {
        assert!(StorageLocation::new("", "key").is_err());
        assert!(StorageLocation::new("bucket", "").is_err());
        assert!(StorageLocation::new("bu,cket", "key").is_err());
        assert!(StorageLocation::new("bucket", "k,ey").is_err());
    }
}
