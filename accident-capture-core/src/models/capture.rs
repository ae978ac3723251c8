use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CaptureError;

/// Which delegated capture flow to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureKind {
    Photo,
    LocationFix,
}

impl fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photo => f.write_str("photo"),
            Self::LocationFix => f.write_str("location"),
        }
    }
}

/// A single launch of a capture flow. Created by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub id: Uuid,
    pub kind: CaptureKind,
    pub launched_at: DateTime<Utc>,
}

impl CaptureRequest {
    pub fn new(kind: CaptureKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            launched_at: Utc::now(),
        }
    }
}

/// A single GPS reading as delivered by the location subscription.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub lat: f64,
    pub lon: f64,
    pub accuracy_meters: f64,
    pub altitude_meters: f64,
}

/// Terminal outcome of one capture launch.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureResult {
    PhotoCaptured { uri: String },
    LocationCaptured(LocationFix),
    PermissionDenied,
    Cancelled,
}

impl CaptureResult {
    /// Collapse an acquirer-internal error into a terminal result.
    ///
    /// Only a missing permission is reported as such; every other failure
    /// reads as a cancelled capture.
    pub fn from_error(error: &CaptureError) -> Self {
        match error {
            CaptureError::PermissionDenied => Self::PermissionDenied,
            _ => Self::Cancelled,
        }
    }
}
