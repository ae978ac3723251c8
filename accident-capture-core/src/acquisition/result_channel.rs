use std::fmt;
use std::sync::Arc;

use crate::models::capture::{CaptureRequest, CaptureResult};
use crate::models::state::AcquirerState;

/// Receives the terminal result of one launch.
pub type ResultHandler = Box<dyn FnOnce(CaptureRequest, CaptureResult) + Send + 'static>;

/// Receives every state change of an acquirer.
pub type StateObserver = Arc<dyn Fn(&AcquirerState) + Send + Sync + 'static>;

/// One-shot sending half of the result channel between an acquirer and the
/// orchestrator.
///
/// `send` consumes the sender, so a launch can never produce two results.
/// Dropping it unsent (teardown) closes the launch without a result.
pub struct ResultSender {
    request: CaptureRequest,
    handler: Option<ResultHandler>,
}

impl ResultSender {
    pub fn new(
        request: CaptureRequest,
        handler: impl FnOnce(CaptureRequest, CaptureResult) + Send + 'static,
    ) -> Self {
        Self {
            request,
            handler: Some(Box::new(handler)),
        }
    }

    pub fn send(mut self, result: CaptureResult) {
        let Some(handler) = self.handler.take() else {
            return;
        };
        log::debug!(
            "{} capture {} finished: {:?}",
            self.request.kind,
            self.request.id,
            result
        );
        handler(self.request.clone(), result);
    }
}

impl Drop for ResultSender {
    fn drop(&mut self) {
        if self.handler.is_some() {
            log::debug!(
                "{} capture {} closed without a result",
                self.request.kind,
                self.request.id
            );
        }
    }
}

impl fmt::Debug for ResultSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSender")
            .field("request", &self.request)
            .field("pending", &self.handler.is_some())
            .finish()
    }
}
