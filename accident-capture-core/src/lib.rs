//! # accident-capture-core
//!
//! Platform-agnostic capture core for the accident report form.
//!
//! Runs the two delegated capture flows (one photo, one GPS fix), merges
//! their results into the report, and validates the report on commit.
//! Platform backends implement the boundary traits (`PermissionGate`,
//! `LocationProvider`, `CaptureSurface`, `SuccessNotifier`) and plug into
//! the generic `CaptureOrchestrator`.
//!
//! ## Architecture
//!
//! ```text
//! accident-capture-core (this crate)
//! ├── traits/       ← Acquirer, PermissionGate, LocationProvider, CaptureSurface, CaptureDelegate
//! ├── models/       ← CaptureError, CaptureResult, LocationState, CaptureConfiguration, AccidentReport
//! ├── acquisition/  ← LocationAcquirer, CameraAcquirer, one-shot result channel
//! ├── session/      ← CaptureOrchestrator, FormState
//! └── storage/      ← photo output files, image decoding
//! ```

pub mod acquisition;
pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use acquisition::camera::CameraAcquirer;
pub use acquisition::location::LocationAcquirer;
pub use acquisition::result_channel::{ResultSender, StateObserver};
pub use models::capture::{CaptureKind, CaptureRequest, CaptureResult, LocationFix};
pub use models::config::{CaptureConfiguration, LocationPriority, LocationRequest};
pub use models::error::CaptureError;
pub use models::permission::{Permission, PermissionSet, PermissionStatus};
pub use models::report::{AccidentReport, AccidentType, CommittedReport, GeoPoint};
pub use models::state::{AcquirerState, CameraState, LocationState};
pub use session::form::FormState;
pub use session::orchestrator::{CapturePlatform, CaptureOrchestrator};
pub use traits::acquirer::Acquirer;
pub use traits::capture_delegate::CaptureDelegate;
pub use traits::capture_surface::{CaptureSurface, SurfaceCallback};
pub use traits::location_provider::{LocationCallback, LocationProvider, SubscriptionId};
pub use traits::notifier::SuccessNotifier;
pub use traits::permission_gate::{PermissionCallback, PermissionGate};
