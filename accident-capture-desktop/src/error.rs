use std::path::PathBuf;

use thiserror::Error;

use accident_capture_core::CaptureError;

/// Errors raised while wiring up the desktop backend.
#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}
