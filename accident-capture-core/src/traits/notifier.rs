use std::time::Duration;

/// Opaque "report saved" side effect, e.g. a haptic buzz.
pub trait SuccessNotifier: Send + Sync {
    fn notify_success(&self, duration: Duration);
}
