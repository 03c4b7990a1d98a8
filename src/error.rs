//! Crate-wide error type.
//!
//! Decode and dimension failures abort a run before anything is written.
//! Encode failures are reported per output; see [`crate::pipeline`].
use crate::image::io::DecodeError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image is {width}x{height}, need at least 3x3 for a 3x3 kernel")]
    Dimension { width: usize, height: usize },

    #[error("failed to start worker pool: {0}")]
    Executor(String),

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("failed to write report {}: {reason}", path.display())]
    Report { path: PathBuf, reason: String },
}
