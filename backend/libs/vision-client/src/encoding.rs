//! Image encoding helpers
//!
//! Providers receive images as standard base64, either raw or wrapped in a
//! `data:` URI.
use crate::error::{Result, VisionError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io;
use std::path::{Path, PathBuf};

/// Resolve an image key (a bare filename) inside the asset directory.
///
/// Keys come from user input, so anything that could escape the directory
/// is rejected as an unreadable image.
pub fn resolve_image_path(asset_dir: &Path, image_key: &str) -> Result<PathBuf> {
    let is_plain_name = !image_key.is_empty()
        && image_key != "."
        && image_key != ".."
        && !image_key.contains(['/', '\\'])
        && !image_key.contains('\0');

    if !is_plain_name {
        return Err(VisionError::ImageRead {
            path: PathBuf::from(image_key),
            source: io::Error::new(io::ErrorKind::InvalidInput, "image key is not a plain file name"),
        });
    }

    Ok(asset_dir.join(image_key))
}

/// Read a file and return its contents as standard base64
pub async fn encode_image_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| VisionError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded)?)
}

/// Inline JPEG data URI
pub fn jpeg_data_uri(image_base64: &str) -> String {
    format!("data:image/jpeg;base64,{}", image_base64)
}
