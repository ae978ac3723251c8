//! Camera surface backed by a sample image on disk.
//!
//! "Taking a photo" copies the configured sample image to the destination
//! on a short-lived thread, then reports success. Without a sample image
//! the surface behaves like a user who closed the camera.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use accident_capture_core::{CaptureSurface, SurfaceCallback};

pub struct FileCaptureSurface {
    sample: Option<PathBuf>,
}

impl FileCaptureSurface {
    pub fn new(sample: Option<PathBuf>) -> Self {
        Self { sample }
    }
}

impl CaptureSurface for FileCaptureSurface {
    fn launch(&self, destination: &Path, on_complete: SurfaceCallback) {
        let Some(sample) = self.sample.clone() else {
            log::warn!("no sample photo configured; capture closed without a photo");
            on_complete(false);
            return;
        };
        let destination = destination.to_path_buf();
        let pending = Arc::new(Mutex::new(Some(on_complete)));
        let worker_pending = Arc::clone(&pending);

        let spawned = thread::Builder::new()
            .name("capture-surface".into())
            .spawn(move || {
                let success = match fs::copy(&sample, &destination) {
                    Ok(bytes) => {
                        log::debug!("wrote {} bytes to {}", bytes, destination.display());
                        true
                    }
                    Err(e) => {
                        log::error!("failed to copy {}: {}", sample.display(), e);
                        false
                    }
                };
                if let Some(on_complete) = worker_pending.lock().take() {
                    on_complete(success);
                }
            });

        if let Err(e) = spawned {
            log::error!("failed to spawn capture surface thread: {}", e);
            if let Some(on_complete) = pending.lock().take() {
                on_complete(false);
            }
        }
    }
}
