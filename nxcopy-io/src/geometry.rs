//! Correction of the detector module size vector.

use crate::Result;
use hdf5::Group;
use log::info;
use nxcopy_core::nexus::MODULE_DATA_SIZE;

/// Reverses `entry/instrument/detector/module/data_size` in place.
///
/// Some vendors write the module size as `(slow, fast)` instead of
/// `(fast, slow)`. The field keeps its shape and element type. Returns the
/// corrected values.
///
/// # Errors
/// Returns an error if the field does not exist or HDF5 I/O fails.
pub fn flip_module_data_size(root: &Group) -> Result<Vec<i64>> {
    let dataset = root.dataset(MODULE_DATA_SIZE)?;
    let mut values = dataset.read_raw::<i64>()?;
    values.reverse();
    dataset.write_raw(values.as_slice())?;
    info!("{MODULE_DATA_SIZE} reversed to {values:?}");
    Ok(values)
}
