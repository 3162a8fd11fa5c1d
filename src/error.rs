//! Error types used inside the crate.
//!
//! The manager's public operations report failure through `bool`/`Option`
//! returns; these errors carry the detail that gets logged on the way.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PerspectiveError {
    #[error("unsupported layout version {0:?}")]
    UnsupportedVersion(String),
    #[error("unknown pane key {0:?}")]
    UnknownKey(String),
    #[error("malformed dock size record {0:?}")]
    BadDockSize(String),
}

#[derive(Debug, Error)]
pub enum DockError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    SnapshotVersion(u32),
    #[error(transparent)]
    Perspective(#[from] PerspectiveError),
}
