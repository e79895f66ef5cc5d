//! Building a linked NeXus description for a payload file.

use crate::attrs::read_string;
use crate::axis::{
    find_axis, find_pair_axis, finish_data_group, locate_and_copy, reconstruct_from_pair,
    resolve_strategy, AxisMode,
};
use crate::geometry::flip_module_data_size;
use crate::link::link_payload;
use crate::tree::{clone_tree, open_group};
use crate::Result;
use hdf5::File;
use log::info;
use nxcopy_core::nexus::{data_group_path, DATA, DETECTOR_DESCRIPTION, ENTRY, SAMPLE};
use nxcopy_core::{output_path_for, AxisSelection, AxisStrategy, CopyOptions, CopyReport};
use std::path::Path;

/// Writes `<payload stem>.nxs`, a copy of the `source` description whose data
/// group is rebuilt around the payload.
///
/// Stages, in order: clone every `entry` child except `data`; write the scan
/// axis into a new `entry/data`; link the payload into it; optionally reverse
/// the module `data_size`. The output is created exclusively and never
/// overwritten. A failure part way leaves an incomplete output file behind.
///
/// # Errors
/// Returns `OutputExists` if the output path is taken, or the error of the
/// first failing stage.
pub fn copy_nexus<P, Q>(payload: P, source: Q, options: &CopyOptions) -> Result<CopyReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let payload = payload.as_ref();
    let output = output_path_for(payload);
    if output.exists() {
        return Err(nxcopy_core::Error::OutputExists {
            path: output.display().to_string(),
        }
        .into());
    }

    let source_file = File::open(source.as_ref())?;
    let out = File::create_excl(&output)?;
    info!(
        "writing {} from {}",
        output.display(),
        source.as_ref().display()
    );

    let entry = clone_tree(&source_file, &out)?;
    let source_data = open_group(&source_file, &data_group_path())?;
    let dest_data = entry.create_group(DATA)?;

    let axis = match resolve_strategy(&source_file, options.axis)? {
        AxisMode::Direct => locate_and_copy(&source_data, &dest_data, &options.selection)?,
        AxisMode::CompressedPair { step } => {
            let sample = open_group(&entry, SAMPLE)?;
            reconstruct_from_pair(
                &source_data,
                &dest_data,
                &sample,
                step,
                &options.selection,
            )?
        }
    };
    finish_data_group(&dest_data, &axis.name)?;

    let links = link_payload(payload, &source_file, &dest_data, options.link_mode)?;

    if options.flip_data_size {
        flip_module_data_size(&out)?;
    }

    info!(
        "{}: axis {} ({} points), {} link(s)",
        output.display(),
        axis.name,
        axis.len,
        links.names.len()
    );

    Ok(CopyReport {
        output,
        axis: axis.name,
        axis_len: axis.len,
        links: links.names,
        payload_created: links.created,
        flipped: options.flip_data_size,
    })
}

/// Read-only summary of a source description.
#[derive(Debug)]
pub struct SourceSummary {
    /// Children of `entry`.
    pub entry_children: Vec<String>,
    /// Members of `entry/data`.
    pub data_members: Vec<String>,
    /// Detector description, if present.
    pub detector: Option<String>,
    /// Axis mode `Auto` resolves to.
    pub mode: AxisMode,
    /// Axis the selection policy picks, or why it cannot.
    pub axis: Result<String>,
}

/// Summarises what [`copy_nexus`] would find in `source`.
///
/// # Errors
/// Returns an error if the file cannot be opened or lacks `entry` or
/// `entry/data`. Axis selection failures are reported in the summary.
pub fn inspect<P: AsRef<Path>>(source: P, selection: &AxisSelection) -> Result<SourceSummary> {
    let file = File::open(source)?;
    let entry = open_group(&file, ENTRY)?;
    let data = open_group(&file, &data_group_path())?;

    let detector = match file.dataset(DETECTOR_DESCRIPTION) {
        Ok(dataset) => Some(read_string(&dataset, DETECTOR_DESCRIPTION)?),
        Err(_) => None,
    };

    let mode = resolve_strategy(&file, AxisStrategy::default())?;
    let axis = match mode {
        AxisMode::Direct => find_axis(&data, selection),
        AxisMode::CompressedPair { .. } => find_pair_axis(&data, selection),
    };

    Ok(SourceSummary {
        entry_children: entry.member_names()?,
        data_members: data.member_names()?,
        detector,
        mode,
        axis,
    })
}
