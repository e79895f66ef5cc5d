//! nxcopy-core: Core types and axis logic for NeXus restructuring.
//!
//! This crate holds everything that does not need the container library:
//! the error taxonomy, copy options, the axis-selection policy, expansion of
//! the compressed `(start, stop)` rotation encoding, and output naming.
//!

pub mod axis;
pub mod error;
pub mod nexus;
pub mod options;
pub mod report;

pub use axis::{expand_pair, AxisValues, DEFAULT_STEP, MAX_AXIS_POINTS};
pub use error::{Error, Result};
pub use nexus::output_path_for;
pub use options::{AxisSelection, AxisStrategy, CopyOptions, LinkMode};
pub use report::CopyReport;
