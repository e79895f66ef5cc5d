//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Container library error.
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Datatype the tree copy cannot replicate.
    #[error("unsupported datatype at {path}: {descriptor}")]
    UnsupportedType { path: String, descriptor: String },

    /// Invalid file format.
    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] nxcopy_core::Error),
}

impl Error {
    pub(crate) fn missing(path: impl Into<String>) -> Self {
        Self::CoreError(nxcopy_core::Error::missing(path))
    }
}
