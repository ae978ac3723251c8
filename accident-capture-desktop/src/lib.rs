//! # accident-capture-desktop
//!
//! Desktop backend for accident-capture.
//!
//! Provides:
//! - `ConfiguredPermissionGate` — permission grants from configuration
//! - `ReplayLocationProvider` — location updates replayed from a GPS track
//! - `FileCaptureSurface` — camera surface that copies a sample image
//! - `LogNotifier` — success notification written to the log
//! - `DesktopConfig` — JSON configuration for all of the above
//!
//! ## Usage
//! ```ignore
//! use accident_capture_desktop::{DesktopConfig, platform};
//! use accident_capture_core::{CaptureKind, CaptureOrchestrator};
//!
//! let config = DesktopConfig::load(path)?;
//! let orchestrator = CaptureOrchestrator::new(platform(&config)?, config.capture.clone())?;
//! orchestrator.launch(CaptureKind::LocationFix)?;
//! ```

pub mod config;
pub mod error;
pub mod file_surface;
pub mod haptics;
pub mod permissions;
pub mod replay_location;

use std::sync::Arc;
use std::time::Duration;

use accident_capture_core::{CapturePlatform, LocationFix};

pub use config::DesktopConfig;
pub use error::DesktopError;
pub use file_surface::FileCaptureSurface;
pub use haptics::LogNotifier;
pub use permissions::ConfiguredPermissionGate;
pub use replay_location::ReplayLocationProvider;

/// Fix used when no GPS track is configured.
pub const DEFAULT_FIX: LocationFix = LocationFix {
    lat: -0.180653,
    lon: -78.467834,
    accuracy_meters: 10.0,
    altitude_meters: 2850.0,
};

/// Build the desktop implementations of every platform boundary.
pub fn platform(config: &DesktopConfig) -> Result<CapturePlatform, DesktopError> {
    let delay = Duration::from_millis(config.fix_delay_ms);
    let locations = match config.gps_track {
        Some(ref track) => ReplayLocationProvider::from_file(track, delay)?,
        None => ReplayLocationProvider::new(vec![DEFAULT_FIX], delay),
    };

    Ok(CapturePlatform {
        permissions: Arc::new(ConfiguredPermissionGate::new(
            config.granted_permissions.iter().copied(),
            config.grant_on_request,
        )),
        locations: Arc::new(locations),
        camera: Arc::new(FileCaptureSurface::new(config.sample_photo.clone())),
        notifier: Arc::new(LogNotifier),
    })
}
