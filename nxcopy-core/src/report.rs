//! Summary of a finished copy run.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a copy run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CopyReport {
    /// Newly created description file.
    pub output: PathBuf,
    /// Resolved scan axis name.
    pub axis: String,
    /// Number of axis points written.
    pub axis_len: usize,
    /// Names of the external links created in `entry/data`.
    pub links: Vec<String>,
    /// Whether the payload file was derived from the source because it did not exist.
    pub payload_created: bool,
    /// Whether `data_size` was reversed.
    pub flipped: bool,
}
