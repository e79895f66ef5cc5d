//! Error types for nxcopy-core.

use thiserror::Error;

/// Result type alias for nxcopy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for nxcopy operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Expected group or dataset is absent from the source description.
    #[error("missing node: {path}")]
    MissingNode { path: String },

    /// Output description already exists; it is never overwritten.
    #[error("output file already exists: {path}")]
    OutputExists { path: String },

    /// Axis selection found zero or several candidate datasets.
    #[error("cannot select scan axis in {group}: expected exactly one candidate, found {candidates:?}")]
    AmbiguousAxis {
        group: String,
        candidates: Vec<String>,
    },

    /// Compressed axis dataset is not a `(start, stop)` pair.
    #[error("invalid axis encoding for {name}: {reason}")]
    InvalidAxisEncoding { name: String, reason: String },

    /// Step or bounds cannot produce a rotation sequence.
    #[error("invalid axis range: start={start}, stop={stop}, step={step}")]
    InvalidAxisRange { start: f64, stop: f64, step: f64 },
}

impl Error {
    /// Shorthand for [`Error::MissingNode`].
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingNode { path: path.into() }
    }
}
