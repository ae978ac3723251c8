use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::acquisition::result_channel::{ResultSender, StateObserver};
use crate::models::capture::CaptureResult;
use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::state::{AcquirerState, CameraState};
use crate::storage::capture_file::{create_capture_file, file_uri};
use crate::storage::photo::decode_photo;
use crate::traits::acquirer::Acquirer;
use crate::traits::capture_surface::CaptureSurface;

struct CameraSession {
    state: CameraState,
    sender: Option<ResultSender>,
    output: Option<PathBuf>,
}

struct Shared {
    session: Mutex<CameraSession>,
    observer: Option<StateObserver>,
}

impl Shared {
    fn notify(&self, state: &CameraState) {
        log::debug!("camera acquirer → {}", state.name());
        if let Some(ref observer) = self.observer {
            observer(&AcquirerState::Camera(state.clone()));
        }
    }

    fn finish(&self, next: CameraState, result: Option<CaptureResult>) -> bool {
        let sender = {
            let mut s = self.session.lock();
            if s.state.is_terminal() {
                return false;
            }
            s.state = next.clone();
            s.sender.take()
        };

        self.notify(&next);

        if let (Some(sender), Some(result)) = (sender, result) {
            sender.send(result);
        }
        true
    }

    fn on_surface_complete(&self, output: &Path, success: bool) {
        {
            let s = self.session.lock();
            if !matches!(s.state, CameraState::AwaitingSurface) {
                log::debug!("ignoring capture surface completion in state {}", s.state.name());
                return;
            }
        }

        match read_photo(output, success) {
            Ok(uri) => {
                log::info!("photo captured: {}", uri);
                self.finish(
                    CameraState::Delivered { uri: uri.clone() },
                    Some(CaptureResult::PhotoCaptured { uri }),
                );
            }
            Err(e) => {
                log::warn!("photo capture produced no photo: {}", e);
                self.finish(CameraState::Cancelled, Some(CaptureResult::from_error(&e)));
            }
        }
    }
}

fn read_photo(output: &Path, success: bool) -> Result<String, CaptureError> {
    if !success {
        return Err(CaptureError::Cancelled);
    }
    let photo = decode_photo(output)?;
    log::debug!("decoded {}x{} photo at {}", photo.width, photo.height, output.display());
    file_uri(output)
}

/// One-shot photo acquisition through an external capture surface.
///
/// Each start creates a fresh output file. If the capture fails the file is
/// left where it is.
pub struct CameraAcquirer {
    surface: Arc<dyn CaptureSurface>,
    config: CaptureConfiguration,
    shared: Arc<Shared>,
}

impl CameraAcquirer {
    pub fn new(
        surface: Arc<dyn CaptureSurface>,
        config: CaptureConfiguration,
        observer: Option<StateObserver>,
    ) -> Self {
        Self {
            surface,
            config,
            shared: Arc::new(Shared {
                session: Mutex::new(CameraSession {
                    state: CameraState::Idle,
                    sender: None,
                    output: None,
                }),
                observer,
            }),
        }
    }

    pub fn state(&self) -> CameraState {
        self.shared.session.lock().state.clone()
    }

    /// Output file of the current attempt, once one has been created.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.shared.session.lock().output.clone()
    }
}

impl Acquirer for CameraAcquirer {
    fn start(&self, sender: ResultSender) -> Result<(), CaptureError> {
        {
            let mut s = self.shared.session.lock();
            if !matches!(s.state, CameraState::Idle) {
                return Err(CaptureError::ConfigurationFailed(format!(
                    "camera acquirer already started (state: {})",
                    s.state.name()
                )));
            }
            s.sender = Some(sender);
            s.state = CameraState::AwaitingSurface;
        }
        self.shared.notify(&CameraState::AwaitingSurface);

        let output = match create_capture_file(&self.config) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("could not create photo output file: {}", e);
                self.shared
                    .finish(CameraState::Cancelled, Some(CaptureResult::from_error(&e)));
                return Ok(());
            }
        };
        self.shared.session.lock().output = Some(output.clone());

        let weak = Arc::downgrade(&self.shared);
        let destination = output.clone();
        self.surface.launch(
            &output,
            Box::new(move |success| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_surface_complete(&destination, success);
                }
            }),
        );
        Ok(())
    }

    fn cancel(&self) {
        self.shared
            .finish(CameraState::Cancelled, Some(CaptureResult::Cancelled));
    }

    fn teardown(&self) {
        self.shared.finish(CameraState::TornDown, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::capture::{CaptureKind, CaptureRequest};
    use crate::testing::{ScriptedSurface, SurfaceScript};

    struct Fixture {
        _dir: tempfile::TempDir,
        config: CaptureConfiguration,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let config = CaptureConfiguration {
            photo_directory: dir.path().join("photos"),
            ..Default::default()
        };
        Fixture { _dir: dir, config }
    }

    fn recording_sender() -> (ResultSender, Arc<Mutex<Vec<CaptureResult>>>) {
        let results = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&results);
        let sender = ResultSender::new(CaptureRequest::new(CaptureKind::Photo), move |_, result| {
            sink.lock().push(result)
        });
        (sender, results)
    }

    #[test]
    fn successful_capture_emits_file_uri() {
        let fx = fixture();
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::WriteImage));
        let acq = CameraAcquirer::new(surface.clone(), fx.config.clone(), None);
        let (sender, results) = recording_sender();

        acq.start(sender).unwrap();

        let output = acq.output_path().unwrap();
        assert!(output.starts_with(&fx.config.photo_directory));
        let results = results.lock();
        assert_eq!(results.len(), 1);
        let CaptureResult::PhotoCaptured { uri } = &results[0] else {
            panic!("expected a photo, got {:?}", results[0]);
        };
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with(&output.file_name().unwrap().to_string_lossy().to_string()));
        assert!(matches!(acq.state(), CameraState::Delivered { .. }));
    }

    #[test]
    fn surface_failure_is_cancelled_and_leaves_file() {
        let fx = fixture();
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::Fail));
        let acq = CameraAcquirer::new(surface, fx.config.clone(), None);
        let (sender, results) = recording_sender();

        acq.start(sender).unwrap();

        assert_eq!(*results.lock(), vec![CaptureResult::Cancelled]);
        assert_eq!(acq.state(), CameraState::Cancelled);
        assert!(acq.output_path().unwrap().exists());
    }

    #[test]
    fn undecodable_output_is_cancelled() {
        let fx = fixture();
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::WriteGarbage));
        let acq = CameraAcquirer::new(surface, fx.config.clone(), None);
        let (sender, results) = recording_sender();

        acq.start(sender).unwrap();

        assert_eq!(*results.lock(), vec![CaptureResult::Cancelled]);
    }

    #[test]
    fn every_start_gets_a_new_file() {
        let fx = fixture();
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::Fail));
        let a = CameraAcquirer::new(surface.clone(), fx.config.clone(), None);
        let b = CameraAcquirer::new(surface.clone(), fx.config.clone(), None);

        a.start(recording_sender().0).unwrap();
        b.start(recording_sender().0).unwrap();

        assert_ne!(a.output_path(), b.output_path());
        assert_eq!(surface.launched().len(), 2);
    }

    #[test]
    fn completion_after_teardown_is_ignored() {
        let fx = fixture();
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::Hold));
        let acq = CameraAcquirer::new(surface.clone(), fx.config.clone(), None);
        let (sender, results) = recording_sender();

        acq.start(sender).unwrap();
        assert_eq!(acq.state(), CameraState::AwaitingSurface);
        acq.teardown();
        surface.complete_held(true);

        assert!(results.lock().is_empty());
        assert_eq!(acq.state(), CameraState::TornDown);
    }

    #[test]
    fn cancel_while_surface_open() {
        let fx = fixture();
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::Hold));
        let acq = CameraAcquirer::new(surface.clone(), fx.config.clone(), None);
        let (sender, results) = recording_sender();

        acq.start(sender).unwrap();
        acq.cancel();
        surface.complete_held(true);

        assert_eq!(*results.lock(), vec![CaptureResult::Cancelled]);
    }

    #[test]
    fn unwritable_directory_is_cancelled_without_launching() {
        let fx = fixture();
        let blocker = fx._dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let config = CaptureConfiguration {
            photo_directory: blocker.join("photos"),
            ..fx.config.clone()
        };
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::WriteImage));
        let acq = CameraAcquirer::new(surface.clone(), config, None);
        let (sender, results) = recording_sender();

        acq.start(sender).unwrap();

        assert_eq!(*results.lock(), vec![CaptureResult::Cancelled]);
        assert!(surface.launched().is_empty());
    }

    #[test]
    fn observer_sees_awaiting_surface_even_when_file_creation_fails() {
        let fx = fixture();
        let blocker = fx._dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let config = CaptureConfiguration {
            photo_directory: blocker.join("photos"),
            ..fx.config.clone()
        };
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer: StateObserver = Arc::new(move |state: &AcquirerState| {
            if let AcquirerState::Camera(s) = state {
                sink.lock().push(s.name());
            }
        });
        let surface = Arc::new(ScriptedSurface::new(SurfaceScript::WriteImage));
        let acq = CameraAcquirer::new(surface, config, Some(observer));
        let (sender, _) = recording_sender();

        acq.start(sender).unwrap();

        assert_eq!(*seen.lock(), vec!["awaiting_surface", "cancelled"]);
    }
}
