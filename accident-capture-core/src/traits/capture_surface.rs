use std::path::Path;

/// Callback invoked once when the capture surface closes.
/// `true` means an image was written to the destination.
pub type SurfaceCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// External one-shot camera surface (system camera app, capture dialog).
///
/// The surface owns its own permission gating and cancellation. Denied
/// access and a user backing out both complete with `false`.
pub trait CaptureSurface: Send + Sync {
    fn launch(&self, destination: &Path, on_complete: SurfaceCallback);
}
