use thiserror::Error;

use super::capture::CaptureKind;

/// Errors that can occur while capturing or committing an accident report.
///
/// None of these are fatal: acquirers normalize them into a
/// [`CaptureResult`](super::capture::CaptureResult) before the orchestrator
/// sees them, and the form surfaces them as a status message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("capture cancelled")]
    Cancelled,

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("{0} capture already in progress")]
    CaptureInProgress(CaptureKind),

    #[error("location subscription failed: {0}")]
    SubscriptionFailed(String),
}
