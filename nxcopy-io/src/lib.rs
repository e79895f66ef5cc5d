//! nxcopy-io: NeXus tree replication and payload linking for nxcopy.
//!
//! Builds a NeXus description file for a detector payload from a template
//! description: the template tree is copied, the scan axis is rebuilt, and
//! the payload is attached through external links so that image and event
//! data are never duplicated.
//!

pub mod attrs;
pub mod axis;
pub mod copy;
mod error;
pub mod geometry;
pub mod link;
pub mod tree;

pub use attrs::{copy_attributes, read_attr_string, read_string, write_attributes, AttrValue};
pub use axis::{AxisMode, ResolvedAxis};
pub use copy::{copy_nexus, inspect, SourceSummary};
pub use error::{Error, Result};
pub use link::PayloadLinks;
