//! Replication of the source description tree.
//!
//! Nodes are copied whole by the library's object copy, so datatypes, storage
//! layout, filters, attributes and any soft or external links inside a copied
//! subtree arrive unchanged.

use crate::attrs::{write_attributes, AttrValue};
use crate::{Error, Result};
use hdf5::{Dataset, Group, LocationType};
use log::{debug, info, warn};
use nxcopy_core::nexus::{DATA, ENTRY, NX_CLASS, NX_ENTRY};

/// Copies the source `entry` into a new `entry` of `dest`, leaving out `data`.
///
/// The new entry is tagged `NX_class = NXentry`. Every other child of the
/// source entry is copied with everything below it.
///
/// # Errors
/// Returns an error if the source has no `entry`, if `dest` already has one,
/// or if a node cannot be copied.
pub fn clone_tree(source_root: &Group, dest: &Group) -> Result<Group> {
    let source_entry = open_group(source_root, ENTRY)?;
    if dest.link_exists(ENTRY) {
        return Err(Error::InvalidFormat(format!(
            "{} already exists in destination",
            join(&dest.name(), ENTRY)
        )));
    }

    let entry = dest.create_group(ENTRY)?;
    write_attributes(&entry, [(NX_CLASS, AttrValue::from(NX_ENTRY))])?;

    for name in source_entry.member_names()? {
        if name == DATA {
            continue;
        }
        copy_member(&source_entry, &name, &entry)?;
    }

    info!("copied {} into new {}", source_entry.name(), entry.name());
    Ok(entry)
}

/// Copies the member `name` of `source` into `dest` under the same name.
///
/// A link at `name` itself is followed and its target copied; links further
/// down are copied as links. Returns `false` if `name` does not resolve to a
/// group or dataset (dangling links, committed datatypes), which is skipped.
///
/// # Errors
/// Returns an error if the object copy fails.
pub fn copy_member(source: &Group, name: &str, dest: &Group) -> Result<bool> {
    match source.loc_type_by_name(name) {
        Ok(LocationType::Group) => source.group(name)?.copy_to(dest, name)?,
        Ok(LocationType::Dataset) => source.dataset(name)?.copy_to(dest, name)?,
        Ok(other) => {
            warn!("skipping {}/{name}: {other:?}", source.name());
            return Ok(false);
        }
        Err(err) => {
            warn!("skipping {}/{name}: {err}", source.name());
            return Ok(false);
        }
    }
    debug!("{}/{name} -> {}/{name}", source.name(), dest.name());
    Ok(true)
}

/// Copies a dataset with its attributes into `dest` under `name`.
///
/// The copy is an independent node with the same datatype, shape, storage
/// layout and values.
///
/// # Errors
/// Returns an error if `name` is taken in `dest` or the object copy fails.
pub fn copy_dataset(source: &Dataset, dest: &Group, name: &str) -> Result<Dataset> {
    debug!("dataset {} -> {}/{name}", source.name(), dest.name());
    source.copy_to(dest, name)?;
    Ok(dest.dataset(name)?)
}

/// Opens `path` below `parent`, reporting a missing node by path.
pub(crate) fn open_group(parent: &Group, path: &str) -> Result<Group> {
    parent
        .group(path)
        .map_err(|_| Error::missing(join(&parent.name(), path)))
}

/// Opens the dataset `path` below `parent`, reporting a missing node by path.
pub(crate) fn open_dataset(parent: &Group, path: &str) -> Result<Dataset> {
    parent
        .dataset(path)
        .map_err(|_| Error::missing(join(&parent.name(), path)))
}

fn join(parent: &str, child: &str) -> String {
    format!("{}/{child}", parent.trim_end_matches('/'))
}
