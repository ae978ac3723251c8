use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use accident_capture_core::{CaptureConfiguration, Permission};

use crate::error::DesktopError;

/// Desktop backend configuration, loaded from a JSON file.
///
/// Relative paths are resolved against the directory of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Permissions treated as already granted at startup.
    pub granted_permissions: Vec<Permission>,

    /// Whether answering a permission prompt grants it.
    pub grant_on_request: bool,

    /// JSON array of `{lat, lon, accuracy_meters, altitude_meters}` fixes.
    pub gps_track: Option<PathBuf>,

    /// Delay before the first replayed fix, in milliseconds.
    pub fix_delay_ms: u64,

    /// Image copied to the destination each time the camera is "opened".
    /// Without one, every capture ends as if the user backed out.
    pub sample_photo: Option<PathBuf>,

    pub capture: CaptureConfiguration,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            granted_permissions: vec![
                Permission::Camera,
                Permission::FineLocation,
                Permission::CoarseLocation,
            ],
            grant_on_request: true,
            gps_track: None,
            fix_delay_ms: 500,
            sample_photo: None,
            capture: CaptureConfiguration::default(),
        }
    }
}

impl DesktopConfig {
    pub fn load(path: &Path) -> Result<Self, DesktopError> {
        let json = fs::read_to_string(path).map_err(|source| DesktopError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: DesktopConfig =
            serde_json::from_str(&json).map_err(|source| DesktopError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.capture.validate().map_err(DesktopError::InvalidConfig)?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(ref mut track) = self.gps_track {
            resolve(track);
        }
        if let Some(ref mut photo) = self.sample_photo {
            resolve(photo);
        }
        resolve(&mut self.capture.photo_directory);
    }
}
