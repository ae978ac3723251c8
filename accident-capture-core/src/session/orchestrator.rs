use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::acquisition::camera::CameraAcquirer;
use crate::acquisition::location::LocationAcquirer;
use crate::acquisition::result_channel::{ResultSender, StateObserver};
use crate::models::capture::{CaptureKind, CaptureRequest, CaptureResult};
use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::permission::{PermissionSet, PermissionStatus};
use crate::models::report::{AccidentReport, CommittedReport};
use crate::models::state::AcquirerState;
use crate::session::form::{messages, FormState};
use crate::traits::acquirer::Acquirer;
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::capture_surface::CaptureSurface;
use crate::traits::location_provider::LocationProvider;
use crate::traits::notifier::SuccessNotifier;
use crate::traits::permission_gate::PermissionGate;

/// Platform collaborators the orchestrator depends on.
#[derive(Clone)]
pub struct CapturePlatform {
    pub permissions: Arc<dyn PermissionGate>,
    pub locations: Arc<dyn LocationProvider>,
    pub camera: Arc<dyn CaptureSurface>,
    pub notifier: Arc<dyn SuccessNotifier>,
}

struct InFlight {
    request: CaptureRequest,
    acquirer: Arc<dyn Acquirer>,
}

struct Inner {
    platform: CapturePlatform,
    config: CaptureConfiguration,
    form: Mutex<FormState>,
    in_flight: Mutex<HashMap<CaptureKind, InFlight>>,
    delegate: Mutex<Option<Arc<dyn CaptureDelegate>>>,
}

impl Inner {
    fn delegate(&self) -> Option<Arc<dyn CaptureDelegate>> {
        self.delegate.lock().clone()
    }

    fn set_status(&self, message: &str) {
        self.form.lock().set_status(message);
        if let Some(delegate) = self.delegate() {
            delegate.on_status(message);
        }
    }

    fn report_error(&self, error: &CaptureError) {
        if let Some(delegate) = self.delegate() {
            delegate.on_error(error);
        }
    }

    /// Merge the terminal result of `request` into the form.
    fn deliver(&self, request: CaptureRequest, result: CaptureResult) {
        let finished = {
            let mut in_flight = self.in_flight.lock();
            let current = in_flight
                .get(&request.kind)
                .is_some_and(|entry| entry.request.id == request.id);
            if current {
                in_flight.remove(&request.kind)
            } else {
                None
            }
        };

        let (changed, status) = {
            let mut form = self.form.lock();
            let changed = form.merge(&result);
            (changed, form.status_message().to_string())
        };

        if changed {
            log::info!("merged {} result from capture {}", request.kind, request.id);
        } else {
            log::warn!(
                "{} capture {} ended without data: {:?}",
                request.kind,
                request.id,
                result
            );
        }

        if let Some(delegate) = self.delegate() {
            delegate.on_result_merged(request.kind, &result);
            delegate.on_status(&status);
        }

        // The acquirer may release platform resources on drop; do that with
        // no lock held.
        drop(finished);
    }
}

/// Parent-side controller for the photo and location capture flows.
///
/// Launches acquirers, receives their terminal results through a one-shot
/// [`ResultSender`], and merges them into the accident report. At most one
/// capture per kind is in flight; a second launch of the same kind is
/// refused. Dropping the orchestrator tears down every in-flight capture.
pub struct CaptureOrchestrator {
    inner: Arc<Inner>,
}

impl CaptureOrchestrator {
    pub fn new(
        platform: CapturePlatform,
        config: CaptureConfiguration,
    ) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        Ok(Self {
            inner: Arc::new(Inner {
                platform,
                config,
                form: Mutex::new(FormState::new()),
                in_flight: Mutex::new(HashMap::new()),
                delegate: Mutex::new(None),
            }),
        })
    }

    pub fn set_delegate(&self, delegate: Arc<dyn CaptureDelegate>) {
        *self.inner.delegate.lock() = Some(delegate);
    }

    pub fn config(&self) -> &CaptureConfiguration {
        &self.inner.config
    }

    /// Snapshot of the report as it stands.
    pub fn report(&self) -> AccidentReport {
        self.inner.form.lock().report().clone()
    }

    pub fn status_message(&self) -> String {
        self.inner.form.lock().status_message().to_string()
    }

    pub fn can_commit(&self) -> bool {
        self.inner.form.lock().can_commit()
    }

    /// Edit the form. The closure must not call back into the orchestrator.
    pub fn edit<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        f(&mut self.inner.form.lock())
    }

    pub fn is_in_flight(&self, kind: CaptureKind) -> bool {
        self.inner.in_flight.lock().contains_key(&kind)
    }

    /// Start a capture flow. Completion is observed through the report, the
    /// status message, and the delegate.
    pub fn launch(&self, kind: CaptureKind) -> Result<CaptureRequest, CaptureError> {
        let request = CaptureRequest::new(kind);

        let acquirer = {
            let mut in_flight = self.inner.in_flight.lock();
            if in_flight.contains_key(&kind) {
                None
            } else {
                let acquirer = self.build_acquirer(kind);
                in_flight.insert(
                    kind,
                    InFlight {
                        request: request.clone(),
                        acquirer: Arc::clone(&acquirer),
                    },
                );
                Some(acquirer)
            }
        };
        let Some(acquirer) = acquirer else {
            let error = CaptureError::CaptureInProgress(kind);
            log::warn!("launch refused: {}", error);
            self.inner.set_status(messages::CAPTURE_IN_PROGRESS);
            self.inner.report_error(&error);
            return Err(error);
        };

        log::info!("launching {} capture {}", kind, request.id);
        let weak = Arc::downgrade(&self.inner);
        let sender = ResultSender::new(request.clone(), move |request, result| {
            if let Some(inner) = weak.upgrade() {
                inner.deliver(request, result);
            }
        });

        if let Err(error) = acquirer.start(sender) {
            self.inner.in_flight.lock().remove(&kind);
            self.inner.report_error(&error);
            return Err(error);
        }
        Ok(request)
    }

    /// Cancel the in-flight capture of `kind`, if any. The acquirer reports
    /// `Cancelled`, which is merged like any other result.
    pub fn cancel(&self, kind: CaptureKind) {
        let acquirer = self
            .inner
            .in_flight
            .lock()
            .get(&kind)
            .map(|entry| Arc::clone(&entry.acquirer));
        if let Some(acquirer) = acquirer {
            log::info!("cancelling {} capture", kind);
            acquirer.cancel();
        }
    }

    /// Host screen disposal: every in-flight capture releases its resources
    /// and no result is merged afterwards.
    pub fn teardown(&self) {
        let drained: Vec<InFlight> = self
            .inner
            .in_flight
            .lock()
            .drain()
            .map(|(_, entry)| entry)
            .collect();
        for entry in drained {
            log::debug!(
                "tearing down {} capture {}",
                entry.request.kind,
                entry.request.id
            );
            entry.acquirer.teardown();
        }
    }

    /// Ask the OS for the permissions a capture kind needs. The outcome is
    /// shown as a status message; the caller launches again afterwards.
    pub fn request_permission(&self, kind: CaptureKind) {
        let set = permission_set(kind);
        let weak = Arc::downgrade(&self.inner);
        self.inner.platform.permissions.request(
            &set,
            Box::new(move |status| {
                if let Some(inner) = weak.upgrade() {
                    on_permission_result(&inner, kind, status);
                }
            }),
        );
    }

    pub fn permission_status(&self, kind: CaptureKind) -> PermissionStatus {
        self.inner.platform.permissions.status(&permission_set(kind))
    }

    /// Validate and commit the report, resetting the form on success.
    pub fn commit(&self) -> Result<CommittedReport, CaptureError> {
        let notification = self.inner.config.success_notification();
        let (outcome, status) = {
            let mut form = self.inner.form.lock();
            let outcome = form.commit(self.inner.platform.notifier.as_ref(), notification);
            (outcome, form.status_message().to_string())
        };

        if let Some(delegate) = self.inner.delegate() {
            match &outcome {
                Ok(committed) => delegate.on_committed(committed),
                Err(error) => delegate.on_error(error),
            }
            delegate.on_status(&status);
        }
        outcome
    }

    fn build_acquirer(&self, kind: CaptureKind) -> Arc<dyn Acquirer> {
        let observer = state_observer(Arc::downgrade(&self.inner), kind);
        let platform = &self.inner.platform;
        match kind {
            CaptureKind::Photo => Arc::new(CameraAcquirer::new(
                Arc::clone(&platform.camera),
                self.inner.config.clone(),
                Some(observer),
            )),
            CaptureKind::LocationFix => Arc::new(LocationAcquirer::new(
                Arc::clone(&platform.permissions),
                Arc::clone(&platform.locations),
                self.inner.config.location_request.clone(),
                Some(observer),
            )),
        }
    }
}

impl Drop for CaptureOrchestrator {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn permission_set(kind: CaptureKind) -> PermissionSet {
    match kind {
        CaptureKind::Photo => PermissionSet::camera(),
        CaptureKind::LocationFix => PermissionSet::location(),
    }
}

fn state_observer(inner: Weak<Inner>, kind: CaptureKind) -> StateObserver {
    Arc::new(move |state: &AcquirerState| {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        if let Some(delegate) = inner.delegate() {
            delegate.on_state_changed(kind, state);
        }
    })
}

fn on_permission_result(inner: &Inner, kind: CaptureKind, status: PermissionStatus) {
    log::info!("{} permission request answered: {:?}", kind, status);
    let message = if status.is_granted() {
        messages::PERMISSIONS_GRANTED
    } else {
        messages::PERMISSIONS_MISSING
    };
    inner.set_status(message);
}
