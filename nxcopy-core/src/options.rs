//! Copy configuration.

use crate::axis::DEFAULT_STEP;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the scan axis of the output data group is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AxisStrategy {
    /// Copy the axis dataset from the source data group unchanged.
    Direct,
    /// Expand a `(start, stop)` pair into one angle per frame.
    CompressedPair {
        /// Increment between consecutive frames.
        step: f64,
    },
    /// Pick `CompressedPair` for Timepix detectors, `Direct` otherwise.
    Auto {
        /// Increment used if the compressed encoding is chosen.
        step: f64,
    },
}

impl Default for AxisStrategy {
    fn default() -> Self {
        Self::Auto { step: DEFAULT_STEP }
    }
}

/// Rule deciding which dataset of the source data group is the scan axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AxisSelection {
    /// The only dataset carrying attributes; zero or several is an error.
    #[default]
    SingleAttributed,
    /// A dataset with this exact name.
    Named(String),
}

/// Shape of the payload references created in the output data group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LinkMode {
    /// One external link named `data`.
    #[default]
    Scan,
    /// One external link per top-level payload member.
    Event,
}

impl LinkMode {
    /// Maps the event-capture flag onto a link mode.
    #[must_use]
    pub fn from_event_flag(event_mode: bool) -> Self {
        if event_mode {
            Self::Event
        } else {
            Self::Scan
        }
    }
}

/// Options for one copy run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CopyOptions {
    /// Axis reconstruction strategy.
    pub axis: AxisStrategy,
    /// Axis dataset selection policy.
    pub selection: AxisSelection,
    /// Payload linking mode.
    pub link_mode: LinkMode,
    /// Reverse `entry/instrument/detector/module/data_size` after copying.
    pub flip_data_size: bool,
}

impl CopyOptions {
    /// Set axis strategy.
    #[must_use]
    pub fn with_axis(mut self, axis: AxisStrategy) -> Self {
        self.axis = axis;
        self
    }

    /// Set axis selection policy.
    #[must_use]
    pub fn with_selection(mut self, selection: AxisSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Set link mode.
    #[must_use]
    pub fn with_link_mode(mut self, link_mode: LinkMode) -> Self {
        self.link_mode = link_mode;
        self
    }

    /// Enable the `data_size` correction.
    #[must_use]
    pub fn with_flip_data_size(mut self, flip: bool) -> Self {
        self.flip_data_size = flip;
        self
    }
}
