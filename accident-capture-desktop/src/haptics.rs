use std::time::Duration;

use accident_capture_core::SuccessNotifier;

/// Stand-in for the phone's vibration motor: logs the buzz.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl SuccessNotifier for LogNotifier {
    fn notify_success(&self, duration: Duration) {
        log::info!("success notification for {} ms", duration.as_millis());
    }
}
