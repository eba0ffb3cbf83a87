//! Forward routing of the create wizard.

use crate::session::{FsKind, WizardSession};
use crate::steps::StepId;

#[must_use]
pub fn first_step() -> StepId {
    StepId::FsType
}

/// Forward target after `current`. Branches follow the type-step flags
/// and the allocation answers; a ufs run takes the short path.
#[must_use]
pub fn next_step(session: &WizardSession, current: StepId) -> Option<StepId> {
    match current {
        StepId::FsType => Some(if session.fs_kind == FsKind::Ufs {
            StepId::Mount
        } else {
            StepId::Defaults
        }),
        StepId::Defaults => Some(after_defaults(session)),
        StepId::MetadataOptions => Some(if session.striped() {
            StepId::BlockAllocation
        } else {
            StepId::Mount
        }),
        StepId::BlockAllocation => Some(StepId::Mount),
        StepId::Mount => Some(after_mount(session)),
        StepId::ClusterNodes => Some(if session.shared {
            StepId::SharedMembers
        } else {
            device_entry(session)
        }),
        StepId::SharedMembers => Some(device_entry(session)),
        StepId::MetadataDevices => Some(data_entry(session)),
        StepId::StripedGroup(index) => Some(after_group(session, index)),
        StepId::DataDevices => Some(archive_or_summary(session)),
        StepId::ArchiveConfig => Some(StepId::Summary),
        StepId::Summary => Some(StepId::Result),
        StepId::Result | StepId::StripedGroupCount => None,
    }
}

fn after_defaults(session: &WizardSession) -> StepId {
    if session.accept_defaults == Some(true) {
        // Accepted defaults only detour through block allocation when a
        // group count is still needed.
        if session.hpc || session.matfs {
            StepId::BlockAllocation
        } else {
            StepId::Mount
        }
    } else if session.hafs || session.hpc || session.matfs {
        // Placement is pinned for these variants; the placement page
        // would have nothing to offer.
        StepId::BlockAllocation
    } else {
        StepId::MetadataOptions
    }
}

fn after_mount(session: &WizardSession) -> StepId {
    if session.hafs {
        StepId::ClusterNodes
    } else if session.shared {
        StepId::SharedMembers
    } else {
        device_entry(session)
    }
}

fn device_entry(session: &WizardSession) -> StepId {
    if session.separate_metadata() {
        StepId::MetadataDevices
    } else {
        data_entry(session)
    }
}

fn data_entry(session: &WizardSession) -> StepId {
    match session.striped_group_count {
        Some(count) if count >= 1 => StepId::StripedGroup(0),
        _ => StepId::DataDevices,
    }
}

fn after_group(session: &WizardSession, index: usize) -> StepId {
    let count = session.striped_group_count.unwrap_or(0) as usize;
    if index + 1 < count {
        StepId::StripedGroup(index + 1)
    } else {
        archive_or_summary(session)
    }
}

fn archive_or_summary(session: &WizardSession) -> StepId {
    if session.archiving {
        StepId::ArchiveConfig
    } else {
        StepId::Summary
    }
}
