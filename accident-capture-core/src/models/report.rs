use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::capture::LocationFix;
use super::error::CaptureError;

/// Kind of accident being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccidentType {
    #[default]
    #[serde(rename = "Choque")]
    Crash,
    #[serde(rename = "Colisión")]
    Collision,
    #[serde(rename = "Atropello")]
    RunOver,
}

impl AccidentType {
    pub const ALL: [AccidentType; 3] = [Self::Crash, Self::Collision, Self::RunOver];

    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Crash => "Choque",
            Self::Collision => "Colisión",
            Self::RunOver => "Atropello",
        }
    }
}

/// Where the accident happened. Accuracy and altitude are not kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl From<LocationFix> for GeoPoint {
    fn from(fix: LocationFix) -> Self {
        Self {
            lat: fix.lat,
            lon: fix.lon,
        }
    }
}

/// The accident report being filled in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccidentReport {
    pub accident_type: AccidentType,
    pub date: String,
    pub plate: String,
    pub driver_name: String,
    pub driver_id: String,
    pub notes: String,
    pub photos: Vec<String>,
    pub location: Option<GeoPoint>,
}

impl AccidentReport {
    /// Names of required fields that are blank after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("date", &self.date),
            ("plate", &self.plate),
            ("driver_name", &self.driver_name),
            ("driver_id", &self.driver_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Snapshot of a report taken at the moment it was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedReport {
    pub id: String,
    pub committed_at: String,
    pub report: AccidentReport,
}

impl CommittedReport {
    pub fn new(report: AccidentReport) -> Self {
        Self::at(report, Utc::now())
    }

    pub fn at(report: AccidentReport, committed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            committed_at: committed_at.to_rfc3339(),
            report,
        }
    }

    /// Pretty-printed JSON for display or hand-off to another system.
    pub fn to_json(&self) -> Result<String, CaptureError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CaptureError::StorageError(format!("failed to serialize report: {}", e)))
    }
}
