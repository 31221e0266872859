//! Asset naming and storage key derivation shared by every backend.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use tubely_core::constants::{ASSET_ID_BYTES, FALLBACK_EXTENSION};
use tubely_core::AspectClass;

/// Extension for a declared media type: `.{subtype}` when the type has exactly one `/`,
/// otherwise `.bin`.
pub fn media_type_to_ext(media_type: &str) -> String {
    let mut parts = media_type.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(subtype), None) => format!(".{}", subtype),
        _ => FALLBACK_EXTENSION.to_string(),
    }
}

/// Random opaque file name for an upload: 32 random bytes as unpadded base64url plus
/// the extension for `media_type`. Collisions are not checked.
pub fn generate_asset_name(media_type: &str) -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..ASSET_ID_BYTES).map(|_| rng.random()).collect();
    format!(
        "{}{}",
        URL_SAFE_NO_PAD.encode(random_bytes),
        media_type_to_ext(media_type)
    )
}

/// Object key for a published video: `{class}/{asset_name}`.
pub fn generate_storage_key(class: AspectClass, asset_name: &str) -> String {
    format!("{}/{}", class.as_str(), asset_name)
}
