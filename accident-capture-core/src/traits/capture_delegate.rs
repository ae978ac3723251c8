use crate::models::capture::{CaptureKind, CaptureResult};
use crate::models::error::CaptureError;
use crate::models::report::CommittedReport;
use crate::models::state::AcquirerState;

/// Event delegate for orchestrator notifications.
///
/// Methods may be called from whichever thread delivered the platform
/// callback. Implementations should marshal to the UI thread if needed.
/// No orchestrator lock is held while a delegate method runs.
pub trait CaptureDelegate: Send + Sync {
    /// Called when an acquirer changes state.
    fn on_state_changed(&self, kind: CaptureKind, state: &AcquirerState);

    /// Called after a terminal result has been merged into the report.
    fn on_result_merged(&self, kind: CaptureKind, result: &CaptureResult);

    /// Called when the user-facing status message changes.
    fn on_status(&self, message: &str);

    /// Called when a commit was rejected or a launch refused.
    fn on_error(&self, error: &CaptureError);

    /// Called after a successful commit, once the form has been reset.
    fn on_committed(&self, report: &CommittedReport);
}
