use std::sync::Arc;

use parking_lot::Mutex;

use crate::acquisition::result_channel::{ResultSender, StateObserver};
use crate::models::capture::{CaptureResult, LocationFix};
use crate::models::config::LocationRequest;
use crate::models::error::CaptureError;
use crate::models::permission::PermissionSet;
use crate::models::state::{AcquirerState, LocationState};
use crate::traits::acquirer::Acquirer;
use crate::traits::location_provider::{LocationCallback, LocationProvider, SubscriptionId};
use crate::traits::permission_gate::PermissionGate;

/// Mutable per-launch state, owned by one `LocationAcquirer`.
struct LocationSession {
    state: LocationState,
    subscription: Option<SubscriptionId>,
    sender: Option<ResultSender>,
    /// `request_updates` is running and the subscription id is not known yet.
    subscribing: bool,
    /// Result produced while subscribing, held until the id is released.
    deferred: Option<(ResultSender, CaptureResult)>,
}

impl LocationSession {
    fn delivered(&self) -> bool {
        matches!(self.state, LocationState::Delivered(_))
    }
}

/// State shared with the provider callback. The callback only holds a weak
/// reference, so dropping the acquirer frees it.
struct Shared {
    session: Mutex<LocationSession>,
    provider: Arc<dyn LocationProvider>,
    observer: Option<StateObserver>,
}

impl Shared {
    fn notify(&self, state: &LocationState) {
        log::debug!("location acquirer → {}", state.name());
        if let Some(ref observer) = self.observer {
            observer(&AcquirerState::Location(state.clone()));
        }
    }

    fn transition(&self, next: LocationState) -> bool {
        {
            let mut s = self.session.lock();
            if s.state.is_terminal() {
                return false;
            }
            s.state = next.clone();
        }
        self.notify(&next);
        true
    }

    /// Move to a terminal state, release the subscription, then emit
    /// `result` if given. Returns false if already terminal.
    ///
    /// The subscription is closed before the result leaves the acquirer, so
    /// a relaunch triggered by the result never overlaps it.
    fn finish(&self, next: LocationState, result: Option<CaptureResult>) -> bool {
        let (delivery, subscription) = {
            let mut s = self.session.lock();
            if s.state.is_terminal() {
                return false;
            }
            s.state = next.clone();
            let delivery = match (s.sender.take(), result) {
                (Some(sender), Some(result)) => Some((sender, result)),
                _ => None,
            };
            if s.subscribing {
                s.deferred = delivery;
                (None, None)
            } else {
                (delivery, s.subscription.take())
            }
        };

        if let Some(id) = subscription {
            self.release(id);
        }

        self.notify(&next);

        if let Some((sender, result)) = delivery {
            sender.send(result);
        }
        true
    }

    fn release(&self, id: SubscriptionId) {
        log::debug!("releasing location subscription {:?}", id);
        self.provider.remove_updates(id);
    }

    fn on_fix(&self, fix: LocationFix) {
        {
            let s = self.session.lock();
            if s.delivered() {
                log::debug!("fix already delivered, dropping late update");
                return;
            }
            if !s.state.is_awaiting_fix() {
                log::debug!("ignoring location update in state {}", s.state.name());
                return;
            }
        }
        log::info!(
            "location fix: {:.6}, {:.6} (±{:.1} m)",
            fix.lat,
            fix.lon,
            fix.accuracy_meters
        );
        self.finish(
            LocationState::Delivered(fix),
            Some(CaptureResult::LocationCaptured(fix)),
        );
    }
}

/// One-shot GPS fix acquisition.
///
/// Checks the location permission set, opens a single-update subscription,
/// reports the first fix and closes the subscription. The subscription is
/// released exactly once, whichever of fix, `cancel` or `teardown` comes
/// first. Dropping the acquirer tears it down.
pub struct LocationAcquirer {
    gate: Arc<dyn PermissionGate>,
    request: LocationRequest,
    shared: Arc<Shared>,
}

impl LocationAcquirer {
    pub fn new(
        gate: Arc<dyn PermissionGate>,
        provider: Arc<dyn LocationProvider>,
        request: LocationRequest,
        observer: Option<StateObserver>,
    ) -> Self {
        Self {
            gate,
            request,
            shared: Arc::new(Shared {
                session: Mutex::new(LocationSession {
                    state: LocationState::Idle,
                    subscription: None,
                    sender: None,
                    subscribing: false,
                    deferred: None,
                }),
                provider,
                observer,
            }),
        }
    }

    pub fn state(&self) -> LocationState {
        self.shared.session.lock().state.clone()
    }

    /// Whether a subscription is currently held open.
    pub fn has_subscription(&self) -> bool {
        self.shared.session.lock().subscription.is_some()
    }

    fn subscribe(&self) {
        {
            let mut s = self.shared.session.lock();
            if !s.state.is_awaiting_fix() {
                return;
            }
            s.subscribing = true;
        }

        let weak = Arc::downgrade(&self.shared);
        let callback: LocationCallback = Arc::new(move |fix| {
            if let Some(shared) = weak.upgrade() {
                shared.on_fix(fix);
            }
        });

        let opened = self.shared.provider.request_updates(&self.request, callback);

        // The provider may have delivered, or the host torn us down, while
        // the subscription was being opened.
        let (keep, deferred) = {
            let mut s = self.shared.session.lock();
            s.subscribing = false;
            let keep = opened.is_ok() && s.state.is_awaiting_fix();
            if let (true, Ok(id)) = (keep, &opened) {
                s.subscription = Some(*id);
            }
            (keep, s.deferred.take())
        };

        match opened {
            Ok(id) if !keep => self.shared.release(id),
            Ok(_) => {}
            Err(e) => {
                log::warn!("could not open location subscription: {}", e);
                self.shared
                    .finish(LocationState::Cancelled, Some(CaptureResult::from_error(&e)));
            }
        }

        if let Some((sender, result)) = deferred {
            sender.send(result);
        }
    }
}

impl Acquirer for LocationAcquirer {
    fn start(&self, sender: ResultSender) -> Result<(), CaptureError> {
        {
            let mut s = self.shared.session.lock();
            if !s.state.is_idle() {
                return Err(CaptureError::ConfigurationFailed(format!(
                    "location acquirer already started (state: {})",
                    s.state.name()
                )));
            }
            s.sender = Some(sender);
            s.state = LocationState::CheckingPermission;
        }
        self.shared.notify(&LocationState::CheckingPermission);

        let status = self.gate.status(&PermissionSet::location());
        if !status.is_granted() {
            log::warn!("location permission not granted");
            self.shared
                .finish(LocationState::Denied, Some(CaptureResult::PermissionDenied));
            return Ok(());
        }

        if self.shared.transition(LocationState::AwaitingFix) {
            self.subscribe();
        }
        Ok(())
    }

    fn cancel(&self) {
        self.shared
            .finish(LocationState::Cancelled, Some(CaptureResult::Cancelled));
    }

    fn teardown(&self) {
        self.shared.finish(LocationState::TornDown, None);
    }
}

impl Drop for LocationAcquirer {
    fn drop(&mut self) {
        self.teardown();
    }
}
