//! Forward routing of the grow wizard, plus the gating rule that decides
//! whether growing is offered for a file system at all.

use fs_console_model::{version_at_least, FileSystemInfo};

use crate::constants::{FEATURE_VERSION_MIN, MAX_DEVICES, MAX_STRIPED_GROUPS};
use crate::session::{MetadataPlacement, WizardSession};
use crate::steps::StepId;

/// Whether the console should offer growing `info`.
///
/// Recent servers can grow a mounted or shared file system online; older
/// ones require it unmounted and unshared. HA file systems are never
/// grown from here.
#[must_use]
pub fn grow_available(api_version: Option<&str>, info: &FileSystemInfo) -> bool {
    if info.ha {
        return false;
    }
    version_at_least(api_version, FEATURE_VERSION_MIN) || (!info.mounted && !info.shared)
}

/// Seed a fresh session from the file system being grown.
pub fn seed_session(session: &mut WizardSession, info: &FileSystemInfo) {
    session.fs_name = Some(info.name.clone());
    session.metadata_placement = Some(if info.separate_metadata {
        MetadataPlacement::Separate
    } else {
        MetadataPlacement::Same
    });
    session.existing_striped_groups = info.striped_group_count;
    session.available_striped_groups =
        info.striped_group_count.map(|existing| MAX_STRIPED_GROUPS.saturating_sub(existing));

    let used = (info.data_device_count + info.metadata_device_count) as usize;
    session.available_devices = Some(MAX_DEVICES.saturating_sub(used));
}

#[must_use]
pub fn first_step(session: &WizardSession) -> StepId {
    if session.separate_metadata() {
        StepId::MetadataDevices
    } else {
        group_entry(session)
    }
}

/// Forward target after `current`, `None` past the terminal step.
#[must_use]
pub fn next_step(session: &WizardSession, current: StepId) -> Option<StepId> {
    match current {
        StepId::MetadataDevices => Some(group_entry(session)),
        StepId::StripedGroupCount => {
            Some(match session.striped_group_count {
                Some(count) if count >= 1 => StepId::StripedGroup(0),
                _ => StepId::Summary,
            })
        }
        StepId::StripedGroup(index) => {
            let count = session.striped_group_count.unwrap_or(0) as usize;
            Some(if index + 1 < count { StepId::StripedGroup(index + 1) } else { StepId::Summary })
        }
        StepId::DataDevices => Some(StepId::Summary),
        StepId::Summary => Some(StepId::Result),
        _ => None,
    }
}

/// A striped file system grows by whole groups; anything else grows by
/// plain data devices.
fn group_entry(session: &WizardSession) -> StepId {
    if session.existing_striped_groups.is_some() {
        StepId::StripedGroupCount
    } else {
        StepId::DataDevices
    }
}
