use std::fs;
use std::path::Path;

use image::GenericImageView;

use crate::models::error::CaptureError;

/// Dimensions of a successfully decoded photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedPhoto {
    pub width: u32,
    pub height: u32,
}

/// Read and decode the image the capture surface wrote to `path`.
pub fn decode_photo(path: &Path) -> Result<DecodedPhoto, CaptureError> {
    let bytes = fs::read(path)
        .map_err(|e| CaptureError::StorageError(format!("failed to read photo: {}", e)))?;
    if bytes.is_empty() {
        return Err(CaptureError::DecodeFailed("photo file is empty".into()));
    }

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| CaptureError::DecodeFailed(e.to_string()))?;
    let (width, height) = decoded.dimensions();
    Ok(DecodedPhoto { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("shot.png");
        image::RgbImage::new(4, 3).save(&png).unwrap();
        let jpg = dir.path().join("JPEG_shot.jpg");
        fs::copy(&png, &jpg).unwrap();

        let photo = decode_photo(&jpg).unwrap();
        assert_eq!(photo, DecodedPhoto { width: 4, height: 3 });
    }

    #[test]
    fn empty_file_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        fs::write(&path, b"").unwrap();
        assert!(matches!(decode_photo(&path), Err(CaptureError::DecodeFailed(_))));
    }

    #[test]
    fn garbage_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jpg");
        fs::write(&path, b"definitely not an image").unwrap();
        assert!(matches!(decode_photo(&path), Err(CaptureError::DecodeFailed(_))));
    }

    #[test]
    fn missing_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode_photo(&dir.path().join("nope.jpg"));
        assert!(matches!(result, Err(CaptureError::StorageError(_))));
    }
}
