//! NeXus layout constants and output naming.

use std::path::{Path, PathBuf};

/// Top-level entry group.
pub const ENTRY: &str = "entry";
/// Data group name under the entry; the one branch that is never copied.
pub const DATA: &str = "data";
/// Sample group name under the entry.
pub const SAMPLE: &str = "sample";
/// Payload member linked in scan mode, also the `signal` of the data group.
pub const SIGNAL: &str = "data";
/// Subgroup of the sample holding the goniometer transformation chain.
pub const TRANSFORMATIONS: &str = "transformations";

/// Free-text detector description used to pick an axis strategy.
pub const DETECTOR_DESCRIPTION: &str = "entry/instrument/detector/description";
/// Module size vector some vendors write in the wrong order.
pub const MODULE_DATA_SIZE: &str = "entry/instrument/detector/module/data_size";
/// Marker in the detector description of detectors writing a compressed axis.
pub const COMPRESSED_AXIS_DETECTOR: &str = "Timepix";

/// NeXus class attribute name.
pub const NX_CLASS: &str = "NX_class";
/// Class of the top-level entry.
pub const NX_ENTRY: &str = "NXentry";
/// Class of the data group.
pub const NX_DATA: &str = "NXdata";

/// Path of the source data group, `entry/data`.
pub fn data_group_path() -> String {
    format!("{ENTRY}/{DATA}")
}

/// Location of the axis inside the sample transformation chain.
pub fn transformation_link(axis: &str) -> String {
    format!("{TRANSFORMATIONS}/{axis}")
}

/// Location of the axis inside its dedicated sample positioner.
pub fn positioner_link(axis: &str) -> String {
    format!("sample_{axis}/{axis}")
}

/// Output description path for a payload file.
///
/// The extension of the payload is replaced with `.nxs`; the file lands next
/// to the payload.
pub fn output_path_for<P: AsRef<Path>>(payload: P) -> PathBuf {
    payload.as_ref().with_extension("nxs")
}
