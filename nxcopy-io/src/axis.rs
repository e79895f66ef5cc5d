//! Scan-axis reconstruction for the output data group.
//!
//! Two strategies produce the axis: copying the attributed dataset of the
//! source data group unchanged, or expanding the `(start, stop)` pair some
//! detectors write instead of a per-frame angle list. The pair strategy also
//! re-points the sample transformation chain at the new axis through hard
//! links, so the data group and the sample subtree share one dataset.

use crate::attrs::{copy_attributes, read_string, write_attributes, AttrValue};
use crate::tree::{copy_dataset, open_dataset};
use crate::{Error, Result};
use hdf5::{Dataset, Group};
use log::{debug, info};
use ndarray::ArrayView1;
use nxcopy_core::nexus::{
    positioner_link, transformation_link, COMPRESSED_AXIS_DETECTOR, DETECTOR_DESCRIPTION,
    NX_CLASS, NX_DATA, SIGNAL,
};
use nxcopy_core::{expand_pair, AxisSelection, AxisStrategy, AxisValues};

/// Concrete axis strategy after `Auto` has been resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisMode {
    /// Copy the axis dataset verbatim.
    Direct,
    /// Expand a `(start, stop)` pair.
    CompressedPair { step: f64 },
}

/// Axis written into the output data group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAxis {
    /// Dataset name, also the `axes` attribute of the data group.
    pub name: String,
    /// Number of axis points.
    pub len: usize,
}

/// Resolves [`AxisStrategy::Auto`] from the source detector description.
///
/// A description containing `Timepix` selects the compressed-pair strategy;
/// anything else, including a missing description, selects direct copy.
///
/// # Errors
/// Returns an error if the description exists but is not text.
pub fn resolve_strategy(source_root: &Group, strategy: AxisStrategy) -> Result<AxisMode> {
    match strategy {
        AxisStrategy::Direct => Ok(AxisMode::Direct),
        AxisStrategy::CompressedPair { step } => Ok(AxisMode::CompressedPair { step }),
        AxisStrategy::Auto { step } => {
            let Ok(dataset) = source_root.dataset(DETECTOR_DESCRIPTION) else {
                debug!("no {DETECTOR_DESCRIPTION}, copying axis directly");
                return Ok(AxisMode::Direct);
            };
            let description = read_string(&dataset, DETECTOR_DESCRIPTION)?;
            let mode = if description.contains(COMPRESSED_AXIS_DETECTOR) {
                AxisMode::CompressedPair { step }
            } else {
                AxisMode::Direct
            };
            info!("detector '{description}': axis mode {mode:?}");
            Ok(mode)
        }
    }
}

/// Finds the axis dataset of a source data group according to `selection`.
///
/// With [`AxisSelection::SingleAttributed`] the axis is the one dataset
/// carrying attributes, ignoring the `data` signal. Groups and members that
/// cannot be opened as datasets are not candidates.
///
/// # Errors
/// Returns `AmbiguousAxis` unless exactly one candidate exists, or
/// `MissingNode` if a named axis is absent.
pub fn find_axis(source_data: &Group, selection: &AxisSelection) -> Result<String> {
    match selection {
        AxisSelection::Named(name) => {
            open_dataset(source_data, name)?;
            Ok(name.clone())
        }
        AxisSelection::SingleAttributed => {
            let mut candidates = Vec::new();
            for name in source_data.member_names()? {
                if name == SIGNAL {
                    continue;
                }
                let Ok(dataset) = source_data.dataset(&name) else {
                    continue;
                };
                if !dataset.attr_names()?.is_empty() {
                    candidates.push(name);
                }
            }
            if candidates.len() == 1 {
                Ok(candidates.remove(0))
            } else {
                Err(nxcopy_core::Error::AmbiguousAxis {
                    group: source_data.name(),
                    candidates,
                }
                .into())
            }
        }
    }
}

/// Finds the compressed `(start, stop)` axis of a source data group.
///
/// Same as [`find_axis`], except that when no dataset carries attributes the
/// only dataset other than the `data` signal is taken.
///
/// # Errors
/// Returns `AmbiguousAxis` if neither rule yields exactly one dataset, or
/// `MissingNode` if a named axis is absent.
pub fn find_pair_axis(source_data: &Group, selection: &AxisSelection) -> Result<String> {
    match find_axis(source_data, selection) {
        Err(Error::CoreError(nxcopy_core::Error::AmbiguousAxis { candidates, .. }))
            if candidates.is_empty() =>
        {
            let mut plain = Vec::new();
            for name in source_data.member_names()? {
                if name != SIGNAL && source_data.dataset(&name).is_ok() {
                    plain.push(name);
                }
            }
            if plain.len() == 1 {
                debug!("{}: using unattributed axis {}", source_data.name(), plain[0]);
                Ok(plain.remove(0))
            } else {
                Err(nxcopy_core::Error::AmbiguousAxis {
                    group: source_data.name(),
                    candidates: plain,
                }
                .into())
            }
        }
        other => other,
    }
}

/// Copies the selected axis dataset of `source_data` into `dest_data`.
///
/// # Errors
/// Returns an error if no single axis can be selected or the copy fails.
pub fn locate_and_copy(
    source_data: &Group,
    dest_data: &Group,
    selection: &AxisSelection,
) -> Result<ResolvedAxis> {
    let name = find_axis(source_data, selection)?;
    let source = open_dataset(source_data, &name)?;
    let copy = copy_dataset(&source, dest_data, &name)?;
    info!("copied axis {}", copy.name());
    Ok(ResolvedAxis {
        name,
        len: copy.size(),
    })
}

/// Expands the compressed axis of `source_data` into `dest_data`.
///
/// The new dataset keeps the source name and attributes. Afterwards
/// `transformations/<axis>` and `sample_<axis>/<axis>` of `dest_sample` are
/// replaced by hard links to it.
///
/// # Errors
/// Returns an error if the axis is not a two-element array, the range is
/// invalid, or one of the sample entries to replace does not exist.
pub fn reconstruct_from_pair(
    source_data: &Group,
    dest_data: &Group,
    dest_sample: &Group,
    step: f64,
    selection: &AxisSelection,
) -> Result<ResolvedAxis> {
    let name = find_pair_axis(source_data, selection)?;
    let source = open_dataset(source_data, &name)?;

    let pair = source.read_raw::<f64>()?;
    let &[start, stop] = pair.as_slice() else {
        return Err(nxcopy_core::Error::InvalidAxisEncoding {
            name,
            reason: format!("expected (start, stop), found {} values", pair.len()),
        }
        .into());
    };

    let values = expand_pair(start, stop, step)?;
    debug!(
        "{name}: ({start}, {stop}) step {step} -> {} points",
        values.len()
    );

    let axis = write_axis_values(dest_data, &name, &values)?;
    copy_attributes(&source, &axis)?;
    link_into_sample(dest_sample, &axis, &name)?;

    Ok(ResolvedAxis {
        name,
        len: values.len(),
    })
}

/// Tags the output data group as `NXdata` with its axis and signal.
///
/// # Errors
/// Returns an error if any attribute already exists or HDF5 I/O fails.
pub fn finish_data_group(dest_data: &Group, axis: &str) -> Result<()> {
    write_attributes(
        dest_data,
        [
            (NX_CLASS, AttrValue::from(NX_DATA)),
            ("axes", AttrValue::from(axis)),
            ("signal", AttrValue::from(SIGNAL)),
        ],
    )
}

fn write_axis_values(group: &Group, name: &str, values: &AxisValues) -> Result<Dataset> {
    let dataset = match values {
        AxisValues::Scalar(value) => {
            let dataset = group.new_dataset::<f64>().shape(()).create(name)?;
            dataset.write_scalar(value)?;
            dataset
        }
        AxisValues::Sequence(points) => {
            let dataset = group
                .new_dataset::<f64>()
                .shape((points.len(),))
                .create(name)?;
            dataset.write(ArrayView1::from(points.as_slice()))?;
            dataset
        }
    };
    Ok(dataset)
}

fn link_into_sample(sample: &Group, axis: &Dataset, name: &str) -> Result<()> {
    let target = axis.name();
    for link in [transformation_link(name), positioner_link(name)] {
        if !sample.link_exists(&link) {
            return Err(Error::missing(format!("{}/{link}", sample.name())));
        }
        sample.unlink(&link)?;
        sample.link_hard(&target, &link)?;
        debug!("{}/{link} -> {target}", sample.name());
    }
    Ok(())
}
