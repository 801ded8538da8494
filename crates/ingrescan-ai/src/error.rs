use std::path::PathBuf;

use ingrescan_core::SessionError;
use thiserror::Error;

/// Failure to obtain or stage an image. No report is produced.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("image file not found: {0}")]
    NotFound(PathBuf),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Server { status: u16, url: String },

    #[error("cannot fetch {0}: built without HTTP support")]
    Unsupported(String),
}

/// Failure of the upstream inference call.
///
/// The pipeline turns these into placeholder report text rather than
/// surfacing them.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reading image: {0}")]
    Io(#[from] std::io::Error),

    #[error("response contained no text")]
    EmptyResponse,
}

/// Failure of a session-driven analysis run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Acquire(#[from] AcquireError),
}
