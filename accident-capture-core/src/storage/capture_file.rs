use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Local;
use url::Url;
use uuid::Uuid;

use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;

/// Create an empty, uniquely named photo output file.
///
/// Named `{prefix}{yyyyMMdd_HHmmss}_{unique}.{ext}` inside the configured
/// photo directory. The file is not removed if the capture later fails.
pub fn create_capture_file(config: &CaptureConfiguration) -> Result<PathBuf, CaptureError> {
    fs::create_dir_all(&config.photo_directory)
        .map_err(|e| CaptureError::StorageError(format!("failed to create directory: {}", e)))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let unique = Uuid::new_v4().simple().to_string();
    let file_name = format!(
        "{}{}_{}.{}",
        config.photo_prefix,
        timestamp,
        &unique[..8],
        config.photo_extension
    );
    let path = config.photo_directory.join(file_name);

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| CaptureError::StorageError(format!("failed to create file: {}", e)))?;

    Ok(path)
}

/// `file://` URI for a local path.
pub fn file_uri(path: &Path) -> Result<String, CaptureError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| CaptureError::StorageError(format!("failed to resolve path: {}", e)))?
            .join(path)
    };
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| {
            CaptureError::StorageError(format!("not a valid file path: {}", absolute.display()))
        })
}
