//! I/O helpers for snapshots, masks and JSON reports.
//!
//! - `load_grayscale_image`: read a PNG/JPEG from disk into an 8-bit gray buffer.
//! - `decode_grayscale`: same for an in-memory encoded image (e.g. an upload).
//! - `save_gray_png`: write a gray buffer (typically a debug mask) to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::{Error, Result};
use image::GrayImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImage> {
    let img = image::open(path)?;
    Ok(img.into_luma8())
}

/// Decode encoded image bytes and convert to 8-bit grayscale.
pub fn decode_grayscale(bytes: &[u8]) -> Result<GrayImage> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.into_luma8())
}

/// Save a grayscale buffer as PNG, creating parent directories.
pub fn save_gray_png(image: &GrayImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}

/// Write plain text (a motion program) to `path`, creating parent directories.
pub fn write_text_file(path: &Path, text: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, text).map_err(|e| Error::io(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_grayscale(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn failed_save_is_not_reported_as_decode() {
        let dir = std::env::temp_dir().join(format!("laserbend-io-{}", std::process::id()));
        let err = save_gray_png(&GrayImage::new(4, 4), &dir.join("mask.unknown")).unwrap_err();
        assert!(matches!(err, Error::Image(_)), "{err:?}");
        assert!(!err.to_string().contains("decode"), "{err}");
        let _ = fs::remove_dir_all(&dir);
    }
}
