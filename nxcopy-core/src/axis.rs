//! Rotation-axis reconstruction from the compressed `(start, stop)` encoding.
//!
//! Some detector families store only the first and last rotation angle of a
//! scan. The full per-frame sequence is rebuilt here by stepping from `start`
//! towards `stop` over the half-open range `[start, stop)`.
#![allow(clippy::cast_precision_loss)]

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default angular increment between frames, in source units.
pub const DEFAULT_STEP: f64 = 0.1;

/// Largest number of points a pair expansion may produce.
pub const MAX_AXIS_POINTS: usize = 1 << 24;

/// Reconstructed axis values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AxisValues {
    /// Still collection (`start == stop`): the axis is a single value.
    Scalar(f64),
    /// Rotation scan: one value per frame.
    Sequence(Vec<f64>),
}

impl AxisValues {
    /// Number of axis points (1 for a scalar axis).
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Sequence(values) => values.len(),
        }
    }

    /// Returns true if a sequence axis holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for the still (no rotation) case.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Axis points as a slice.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::Sequence(values) => values,
        }
    }
}

/// Expands a `(start, stop)` pair into the per-frame axis.
///
/// Each point is `start + i * step` rounded to one decimal place, for every
/// `i` with `start + i * step < stop`. When `start == stop` the axis is the
/// scalar `start`.
///
/// # Errors
/// Returns [`Error::InvalidAxisRange`] if `step` is not a positive finite
/// number, if either bound is not finite, if `stop < start`, or if the range
/// holds more than [`MAX_AXIS_POINTS`] steps.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn expand_pair(start: f64, stop: f64, step: f64) -> Result<AxisValues> {
    let invalid = || Error::InvalidAxisRange { start, stop, step };

    if !start.is_finite() || !stop.is_finite() {
        return Err(invalid());
    }

    if start == stop {
        return Ok(AxisValues::Scalar(start));
    }

    if !step.is_finite() || step <= 0.0 || stop < start {
        return Err(invalid());
    }

    let count = ((stop - start) / step).ceil();
    if count > MAX_AXIS_POINTS as f64 {
        return Err(invalid());
    }

    let mut values = Vec::with_capacity(count as usize);
    let mut i: u64 = 0;
    loop {
        let value = start + i as f64 * step;
        if value >= stop {
            break;
        }
        values.push(round_one_decimal(value));
        i += 1;
    }

    Ok(AxisValues::Sequence(values))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
