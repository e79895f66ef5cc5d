//! Attaching the detector payload to the output data group by reference.

use crate::tree::{copy_dataset, open_dataset};
use crate::Result;
use hdf5::{File, Group};
use log::{debug, info, warn};
use nxcopy_core::nexus::{DATA, ENTRY, SIGNAL};
use nxcopy_core::LinkMode;
use std::path::Path;

/// External links created by [`link_payload`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadLinks {
    /// Link names in the output data group.
    pub names: Vec<String>,
    /// True if the payload file did not exist and was derived from the source.
    pub created: bool,
}

/// Links the payload file into `dest_data` without copying its contents.
///
/// If `payload` does not exist yet, it is created and seeded with a copy of
/// the source `entry/data/data`; otherwise it is opened read-only. In
/// [`LinkMode::Scan`] one link `data -> payload:/data` is made, in
/// [`LinkMode::Event`] one same-named link per top-level payload member.
/// The payload file is closed before returning.
///
/// # Errors
/// Returns an error if the payload cannot be created or opened, the source
/// has no `entry/data/data` when one is needed, or a link cannot be created.
pub fn link_payload(
    payload: &Path,
    source_root: &Group,
    dest_data: &Group,
    mode: LinkMode,
) -> Result<PayloadLinks> {
    let created = !payload.exists();
    let file = if created {
        let file = File::create_excl(payload)?;
        let signal = open_dataset(source_root, &format!("{ENTRY}/{DATA}/{SIGNAL}"))?;
        copy_dataset(&signal, &file, SIGNAL)?;
        info!("seeded new payload {} from {}", payload.display(), signal.name());
        file
    } else {
        File::open(payload)?
    };

    let names = match mode {
        LinkMode::Event => file.member_names()?,
        LinkMode::Scan => {
            if !file.link_exists(SIGNAL) {
                warn!("{} has no /{SIGNAL}; link will dangle", payload.display());
            }
            vec![SIGNAL.to_string()]
        }
    };

    let target_file = file.filename();
    for name in &names {
        dest_data.link_external(&target_file, &format!("/{name}"), name)?;
        debug!("{}/{name} -> {target_file}:/{name}", dest_data.name());
    }
    drop(file);

    Ok(PayloadLinks { names, created })
}
