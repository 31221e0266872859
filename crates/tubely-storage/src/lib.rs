//! Tubely Storage Library
//!
//! Storage abstraction for published videos and thumbnails, with an S3 backend
//! (via `object_store`) and a local filesystem backend that issues HMAC-signed URLs.
//!
//! # Storage key format
//!
//! Video keys are `{aspect_class}/{asset_name}`, where the asset name is 32 random bytes
//! encoded as unpadded base64url followed by an extension derived from the declared
//! media type. Thumbnail keys are flat file names. Keys must not contain `..` or a
//! leading `/`. Key generation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use factory::{create_assets_storage, create_local_storage};
pub use keys::{generate_asset_name, generate_storage_key, media_type_to_ext};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
