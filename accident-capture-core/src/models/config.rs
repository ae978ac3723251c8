use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Accuracy/power trade-off requested from the location provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPriority {
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
}

/// Parameters of a location-update subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRequest {
    pub priority: LocationPriority,

    /// Base update interval in milliseconds (default: 10000).
    pub interval_ms: u64,

    /// Fastest rate updates may arrive at, in milliseconds (default: 5000).
    pub min_interval_ms: u64,

    /// Number of updates after which the subscription ends (default: 1).
    pub max_updates: u32,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            priority: LocationPriority::HighAccuracy,
            interval_ms: 10_000,
            min_interval_ms: 5_000,
            max_updates: 1,
        }
    }
}

/// Configuration shared by the acquirers and the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfiguration {
    pub location_request: LocationRequest,

    /// App-private directory where photo output files are created.
    pub photo_directory: PathBuf,

    /// File name prefix for photo output (default: "JPEG_").
    pub photo_prefix: String,

    /// File extension for photo output, without the dot (default: "jpg").
    pub photo_extension: String,

    /// How long the success notification lasts (default: 5000 ms).
    pub success_notification_ms: u64,
}

impl CaptureConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        let req = &self.location_request;
        if req.interval_ms == 0 {
            return Err("location interval must be positive".into());
        }
        if req.min_interval_ms > req.interval_ms {
            return Err(format!(
                "minimum location interval {}ms exceeds base interval {}ms",
                req.min_interval_ms, req.interval_ms
            ));
        }
        if req.max_updates != 1 {
            return Err(format!(
                "location capture is one-shot, max_updates must be 1 (got {})",
                req.max_updates
            ));
        }
        if self.photo_extension.is_empty() || self.photo_extension.contains('.') {
            return Err(format!("invalid photo extension: {:?}", self.photo_extension));
        }
        Ok(())
    }

    pub fn success_notification(&self) -> Duration {
        Duration::from_millis(self.success_notification_ms)
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            location_request: LocationRequest::default(),
            photo_directory: std::env::temp_dir().join("accident-capture"),
            photo_prefix: "JPEG_".into(),
            photo_extension: "jpg".into(),
            success_notification_ms: 5_000,
        }
    }
}
