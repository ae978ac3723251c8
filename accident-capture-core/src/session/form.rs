use std::time::Duration;

use crate::models::capture::CaptureResult;
use crate::models::error::CaptureError;
use crate::models::report::{AccidentReport, AccidentType, CommittedReport, GeoPoint};
use crate::traits::notifier::SuccessNotifier;

/// User-facing status messages.
pub mod messages {
    pub const PHOTO_ADDED: &str = "📸 Foto añadida";
    pub const LOCATION_OBTAINED: &str = "📍 Ubicación obtenida";
    pub const PERMISSION_DENIED: &str = "Permiso denegado";
    pub const CANCELLED: &str = "Captura cancelada";
    pub const MISSING_FIELDS: &str = "❌ Completa todos los campos obligatorios";
    pub const COMMITTED: &str = "✅ Accidente registrado";
    pub const PERMISSIONS_GRANTED: &str = "Todos los permisos concedidos";
    pub const PERMISSIONS_MISSING: &str = "Faltan permisos por conceder";
    pub const CAPTURE_IN_PROGRESS: &str = "Ya hay una captura en curso";
}

/// The accident report being edited, plus the current status message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    report: AccidentReport,
    status: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> &AccidentReport {
        &self.report
    }

    pub fn status_message(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    pub fn set_accident_type(&mut self, accident_type: AccidentType) {
        self.report.accident_type = accident_type;
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.report.date = date.into();
    }

    pub fn set_plate(&mut self, plate: impl Into<String>) {
        self.report.plate = plate.into();
    }

    pub fn set_driver_name(&mut self, name: impl Into<String>) {
        self.report.driver_name = name.into();
    }

    /// Only ASCII digits are kept; anything else typed is dropped.
    pub fn set_driver_id(&mut self, id: &str) {
        self.report.driver_id = id.chars().filter(char::is_ascii_digit).collect();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.report.notes = notes.into();
    }

    /// Apply a capture result. Returns whether the report changed.
    ///
    /// Photos accumulate in arrival order; a new location replaces the old.
    pub fn merge(&mut self, result: &CaptureResult) -> bool {
        match result {
            CaptureResult::PhotoCaptured { uri } => {
                self.report.photos.push(uri.clone());
                self.status = messages::PHOTO_ADDED.into();
                true
            }
            CaptureResult::LocationCaptured(fix) => {
                self.report.location = Some(GeoPoint::from(*fix));
                self.status = messages::LOCATION_OBTAINED.into();
                true
            }
            CaptureResult::PermissionDenied => {
                self.status = messages::PERMISSION_DENIED.into();
                false
            }
            CaptureResult::Cancelled => {
                self.status = messages::CANCELLED.into();
                false
            }
        }
    }

    /// Whether every required field is filled in. Photos and location are
    /// optional.
    pub fn can_commit(&self) -> bool {
        self.report.missing_fields().is_empty()
    }

    /// Validate, fire the success notification, and reset the form.
    ///
    /// On rejection the report is left untouched and the status message is
    /// set to the rejection text.
    pub fn commit(
        &mut self,
        notifier: &dyn SuccessNotifier,
        notification: Duration,
    ) -> Result<CommittedReport, CaptureError> {
        let missing = self.report.missing_fields();
        if !missing.is_empty() {
            log::warn!("commit rejected, missing: {}", missing.join(", "));
            self.status = messages::MISSING_FIELDS.into();
            return Err(CaptureError::ValidationFailed(messages::MISSING_FIELDS.into()));
        }

        notifier.notify_success(notification);

        let committed = CommittedReport::new(std::mem::take(&mut self.report));
        self.status = messages::COMMITTED.into();
        log::info!(
            "report {} committed with {} photo(s)",
            committed.id,
            committed.report.photos.len()
        );
        Ok(committed)
    }
}
