//! In-crate fakes for the platform boundaries.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::models::capture::{CaptureKind, CaptureResult, LocationFix};
use crate::models::config::LocationRequest;
use crate::models::error::CaptureError;
use crate::models::permission::{Permission, PermissionSet};
use crate::models::report::CommittedReport;
use crate::models::state::AcquirerState;
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::capture_surface::{CaptureSurface, SurfaceCallback};
use crate::traits::location_provider::{LocationCallback, LocationProvider, SubscriptionId};
use crate::traits::notifier::SuccessNotifier;
use crate::traits::permission_gate::{PermissionCallback, PermissionGate};

pub struct FakePermissionGate {
    granted: Mutex<HashSet<Permission>>,
    grant_on_request: bool,
    pub requests: Mutex<Vec<&'static str>>,
}

impl FakePermissionGate {
    pub fn granting(permissions: &[Permission]) -> Self {
        Self {
            granted: Mutex::new(permissions.iter().copied().collect()),
            grant_on_request: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn granting_all() -> Self {
        Self::granting(&[
            Permission::Camera,
            Permission::FineLocation,
            Permission::CoarseLocation,
        ])
    }

    /// Nothing granted yet; the prompt grants whatever is asked for.
    pub fn prompting_grant() -> Self {
        Self {
            grant_on_request: true,
            ..Self::granting(&[])
        }
    }
}

impl PermissionGate for FakePermissionGate {
    fn is_granted(&self, permission: Permission) -> bool {
        self.granted.lock().contains(&permission)
    }

    fn request(&self, set: &PermissionSet, callback: PermissionCallback) {
        self.requests.lock().push(set.name);
        if self.grant_on_request {
            self.granted.lock().extend(set.permissions.iter().copied());
        }
        callback(self.status(set));
    }
}

/// Location provider driven by the test: fixes are delivered on demand.
pub struct ManualLocationProvider {
    next_id: AtomicU64,
    open: Mutex<HashMap<SubscriptionId, LocationCallback>>,
    opened: Mutex<Vec<SubscriptionId>>,
    removed: Mutex<Vec<SubscriptionId>>,
    requests: Mutex<Vec<LocationRequest>>,
    max_open: Mutex<usize>,
    immediate: Mutex<Option<LocationFix>>,
    last_callback: Mutex<Option<LocationCallback>>,
    failure: Option<String>,
}

impl ManualLocationProvider {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            open: Mutex::new(HashMap::new()),
            opened: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            max_open: Mutex::new(0),
            immediate: Mutex::new(None),
            last_callback: Mutex::new(None),
            failure: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new()
        }
    }

    /// Deliver this fix from inside the next `request_updates` call.
    pub fn deliver_immediately(&self, fix: LocationFix) {
        *self.immediate.lock() = Some(fix);
    }

    /// Deliver a fix to every open subscription.
    pub fn deliver(&self, fix: LocationFix) {
        let callbacks: Vec<LocationCallback> = self.open.lock().values().cloned().collect();
        for callback in callbacks {
            callback(fix);
        }
    }

    pub fn last_callback(&self) -> Option<LocationCallback> {
        self.last_callback.lock().clone()
    }

    pub fn open_count(&self) -> usize {
        self.open.lock().len()
    }

    pub fn max_open(&self) -> usize {
        *self.max_open.lock()
    }

    pub fn opened_count(&self) -> usize {
        self.opened.lock().len()
    }

    pub fn removed(&self) -> Vec<SubscriptionId> {
        self.removed.lock().clone()
    }

    pub fn requests(&self) -> Vec<LocationRequest> {
        self.requests.lock().clone()
    }

    /// Every opened subscription was removed, and none more than once.
    pub fn each_released_once(&self) -> bool {
        let opened = self.opened.lock().clone();
        let removed = self.removed.lock().clone();
        let unique: HashSet<_> = removed.iter().collect();
        unique.len() == removed.len()
            && removed.len() == opened.len()
            && opened.iter().all(|id| unique.contains(id))
    }
}

impl LocationProvider for ManualLocationProvider {
    fn request_updates(
        &self,
        request: &LocationRequest,
        callback: LocationCallback,
    ) -> Result<SubscriptionId, CaptureError> {
        self.requests.lock().push(request.clone());
        if let Some(ref reason) = self.failure {
            return Err(CaptureError::SubscriptionFailed(reason.clone()));
        }

        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        {
            let mut open = self.open.lock();
            open.insert(id, Arc::clone(&callback));
            let mut max = self.max_open.lock();
            *max = (*max).max(open.len());
        }
        self.opened.lock().push(id);
        *self.last_callback.lock() = Some(Arc::clone(&callback));

        let immediate = self.immediate.lock().take();
        if let Some(fix) = immediate {
            callback(fix);
        }
        Ok(id)
    }

    fn remove_updates(&self, id: SubscriptionId) {
        self.removed.lock().push(id);
        self.open.lock().remove(&id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceScript {
    /// Write a small PNG to the destination and report success.
    WriteImage,
    /// Write bytes that are not an image and report success.
    WriteGarbage,
    /// Report failure without touching the destination.
    Fail,
    /// Keep the callback until `complete_held` is called.
    Hold,
}

pub struct ScriptedSurface {
    script: SurfaceScript,
    launched: Mutex<Vec<PathBuf>>,
    held: Mutex<Vec<(PathBuf, SurfaceCallback)>>,
}

impl ScriptedSurface {
    pub fn new(script: SurfaceScript) -> Self {
        Self {
            script,
            launched: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        }
    }

    pub fn launched(&self) -> Vec<PathBuf> {
        self.launched.lock().clone()
    }

    /// Complete every held launch, writing an image first on success.
    pub fn complete_held(&self, success: bool) {
        let held: Vec<_> = self.held.lock().drain(..).collect();
        for (destination, callback) in held {
            if success {
                write_test_image(&destination);
            }
            callback(success);
        }
    }
}

pub fn write_test_image(destination: &Path) {
    image::RgbImage::new(2, 2)
        .save_with_format(destination, image::ImageFormat::Png)
        .unwrap();
}

impl CaptureSurface for ScriptedSurface {
    fn launch(&self, destination: &Path, on_complete: SurfaceCallback) {
        self.launched.lock().push(destination.to_path_buf());
        match self.script {
            SurfaceScript::WriteImage => {
                write_test_image(destination);
                on_complete(true);
            }
            SurfaceScript::WriteGarbage => {
                std::fs::write(destination, b"not a jpeg").unwrap();
                on_complete(true);
            }
            SurfaceScript::Fail => on_complete(false),
            SurfaceScript::Hold => {
                self.held
                    .lock()
                    .push((destination.to_path_buf(), on_complete));
            }
        }
    }
}

#[derive(Default)]
pub struct CountingNotifier {
    pub calls: Mutex<Vec<Duration>>,
}

impl SuccessNotifier for CountingNotifier {
    fn notify_success(&self, duration: Duration) {
        self.calls.lock().push(duration);
    }
}

#[derive(Default)]
pub struct RecordingDelegate {
    pub states: Mutex<Vec<(CaptureKind, AcquirerState)>>,
    pub merged: Mutex<Vec<(CaptureKind, CaptureResult)>>,
    pub statuses: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<CaptureError>>,
    pub committed: Mutex<Vec<CommittedReport>>,
}

impl CaptureDelegate for RecordingDelegate {
    fn on_state_changed(&self, kind: CaptureKind, state: &AcquirerState) {
        self.states.lock().push((kind, state.clone()));
    }

    fn on_result_merged(&self, kind: CaptureKind, result: &CaptureResult) {
        self.merged.lock().push((kind, result.clone()));
    }

    fn on_status(&self, message: &str) {
        self.statuses.lock().push(message.to_string());
    }

    fn on_error(&self, error: &CaptureError) {
        self.errors.lock().push(error.clone());
    }

    fn on_committed(&self, report: &CommittedReport) {
        self.committed.lock().push(report.clone());
    }
}
