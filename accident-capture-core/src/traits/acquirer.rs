use crate::acquisition::result_channel::ResultSender;
use crate::models::error::CaptureError;

/// A one-shot hardware capture flow.
///
/// Each instance serves a single launch. `start` hands over the result
/// sender; the acquirer sends exactly one terminal result through it unless
/// it is torn down first.
pub trait Acquirer: Send + Sync {
    /// Begin acquisition. Fails only if this instance was already started.
    fn start(&self, sender: ResultSender) -> Result<(), CaptureError>;

    /// Abort and report `Cancelled`. No-op once terminal.
    fn cancel(&self);

    /// Host screen is going away: release resources, report nothing.
    fn teardown(&self);
}
