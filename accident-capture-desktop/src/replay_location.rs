//! Location provider that replays a recorded GPS track.
//!
//! Each subscription gets its own delivery thread. Fixes are taken from the
//! track in order, shared across subscriptions, and the track wraps around
//! when exhausted.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use accident_capture_core::{
    CaptureError, LocationCallback, LocationFix, LocationProvider, LocationRequest,
    SubscriptionId,
};

use crate::error::DesktopError;

pub struct ReplayLocationProvider {
    track: Arc<Vec<LocationFix>>,
    cursor: Arc<Mutex<usize>>,
    first_fix_delay: Duration,
    next_id: AtomicU64,
    active: Mutex<HashMap<SubscriptionId, Arc<AtomicBool>>>,
}

impl ReplayLocationProvider {
    pub fn new(track: Vec<LocationFix>, first_fix_delay: Duration) -> Self {
        Self {
            track: Arc::new(track),
            cursor: Arc::new(Mutex::new(0)),
            first_fix_delay,
            next_id: AtomicU64::new(1),
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Load a track from a JSON array of fixes.
    pub fn from_file(path: &Path, first_fix_delay: Duration) -> Result<Self, DesktopError> {
        let json = fs::read_to_string(path).map_err(|source| DesktopError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let track: Vec<LocationFix> =
            serde_json::from_str(&json).map_err(|source| DesktopError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(track, first_fix_delay))
    }

    pub fn active_subscriptions(&self) -> usize {
        self.active.lock().len()
    }
}

impl LocationProvider for ReplayLocationProvider {
    fn request_updates(
        &self,
        request: &LocationRequest,
        callback: LocationCallback,
    ) -> Result<SubscriptionId, CaptureError> {
        if self.track.is_empty() {
            return Err(CaptureError::SubscriptionFailed("GPS track is empty".into()));
        }

        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let running = Arc::new(AtomicBool::new(true));
        self.active.lock().insert(id, Arc::clone(&running));

        let track = Arc::clone(&self.track);
        let cursor = Arc::clone(&self.cursor);
        let first_delay = self.first_fix_delay;
        let interval = Duration::from_millis(request.min_interval_ms);
        let max_updates = request.max_updates;

        thread::Builder::new()
            .name(format!("gps-replay-{}", id.0))
            .spawn(move || {
                thread::sleep(first_delay);
                for delivered in 0..max_updates {
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }
                    if delivered > 0 {
                        thread::sleep(interval);
                        if !running.load(Ordering::SeqCst) {
                            break;
                        }
                    }
                    let fix = {
                        let mut c = cursor.lock();
                        let fix = track[*c % track.len()];
                        *c += 1;
                        fix
                    };
                    callback(fix);
                }
            })
            .map_err(|e| {
                self.active.lock().remove(&id);
                CaptureError::SubscriptionFailed(format!("failed to spawn replay thread: {}", e))
            })?;

        log::debug!("opened replay subscription {:?}", id);
        Ok(id)
    }

    fn remove_updates(&self, id: SubscriptionId) {
        // Not joined: removal usually happens on the replay thread itself.
        if let Some(running) = self.active.lock().remove(&id) {
            running.store(false, Ordering::SeqCst);
            log::debug!("removed replay subscription {:?}", id);
        }
    }
}
