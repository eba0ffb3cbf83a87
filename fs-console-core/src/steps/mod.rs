//! Step contract and the step implementations behind both wizards.
//!
//! Every page of a wizard is a [`WizardStep`]: it declares its field
//! schema, prepares the session for display in `on_enter`, and validates
//! and stores submitted input in `on_submit`. Steps never decide what
//! comes next; sequencing lives in [`crate::flows`].

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engine::WizardContext;
use crate::error::WizardResult;
use crate::session::{AllocationMethod, MetadataPlacement, PolicyType, WizardSession};

mod archive_config;
mod block_allocation;
mod cluster_nodes;
mod defaults;
mod devices;
mod fs_type;
mod metadata_options;
mod mount;
mod result;
mod shared_members;
mod striped_group_count;
mod summary;

pub use archive_config::ArchiveConfigStep;
pub use block_allocation::BlockAllocationStep;
pub use cluster_nodes::ClusterNodesStep;
pub use defaults::{derived_defaults, DefaultsStep, DerivedDefaults};
pub use devices::DeviceSelectStep;
pub use fs_type::FsTypeStep;
pub use metadata_options::MetadataOptionsStep;
pub use mount::MountStep;
pub use result::ResultStep;
pub use shared_members::SharedMembersStep;
pub use striped_group_count::StripedGroupCountStep;
pub use summary::SummaryStep;

/// Logical identity of a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepId {
    FsType,
    Defaults,
    MetadataOptions,
    BlockAllocation,
    Mount,
    ClusterNodes,
    SharedMembers,
    MetadataDevices,
    DataDevices,
    StripedGroupCount,
    /// One page per striped group, indexed from zero.
    StripedGroup(usize),
    ArchiveConfig,
    Summary,
    Result,
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FsType => write!(f, "fsType"),
            Self::Defaults => write!(f, "defaults"),
            Self::MetadataOptions => write!(f, "metadataOptions"),
            Self::BlockAllocation => write!(f, "blockAllocation"),
            Self::Mount => write!(f, "mount"),
            Self::ClusterNodes => write!(f, "clusterNodes"),
            Self::SharedMembers => write!(f, "sharedMembers"),
            Self::MetadataDevices => write!(f, "metadataDevices"),
            Self::DataDevices => write!(f, "dataDevices"),
            Self::StripedGroupCount => write!(f, "stripedGroupCount"),
            Self::StripedGroup(index) => write!(f, "stripedGroup[{index}]"),
            Self::ArchiveConfig => write!(f, "archiveConfig"),
            Self::Summary => write!(f, "summary"),
            Self::Result => write!(f, "result"),
        }
    }
}

/// Render targets a step can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderTarget {
    /// The step's normal content pagelet.
    Pagelet,
    /// The step's error pagelet, replacing the normal content.
    ErrorPagelet,
}

/// Pagelet pair registered for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    pub id: StepId,
    pub pagelet: &'static str,
    pub error_pagelet: &'static str,
}

impl StepDescriptor {
    #[must_use]
    pub fn of(id: StepId) -> Self {
        let (pagelet, error_pagelet) = match id {
            StepId::FsType => ("fsType", "fsType.error"),
            StepId::Defaults => ("defaults", "defaults.error"),
            StepId::MetadataOptions => ("metadataOptions", "metadataOptions.error"),
            StepId::BlockAllocation => ("blockAllocation", "blockAllocation.error"),
            StepId::Mount => ("mount", "mount.error"),
            StepId::ClusterNodes => ("clusterNodes", "clusterNodes.error"),
            StepId::SharedMembers => ("sharedMembers", "sharedMembers.error"),
            StepId::MetadataDevices => ("metadataDevices", "metadataDevices.error"),
            StepId::DataDevices => ("dataDevices", "dataDevices.error"),
            StepId::StripedGroupCount => ("stripedGroupCount", "stripedGroupCount.error"),
            StepId::StripedGroup(_) => ("stripedGroup", "stripedGroup.error"),
            StepId::ArchiveConfig => ("archiveConfig", "archiveConfig.error"),
            StepId::Summary => ("summary", "summary.error"),
            StepId::Result => ("result", "result.error"),
        };
        Self { id, pagelet, error_pagelet }
    }
}

/// Widget family the hosting layer should render for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Checkbox,
    Radio,
    Menu,
    MultiSelect,
    IntRange(i64, i64),
    StaticText,
}

/// One field in a step's declarative schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field identifier within the step's pagelet.
    pub id: &'static str,
    pub kind: FieldKind,
    /// Whether submission requires a value.
    pub required: bool,
}

/// Unit attached to the block-size entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizeUnit {
    Kb,
    Mb,
}

/// Form input submitted to a step.
///
/// Numeric entry fields arrive as the raw strings the user typed;
/// parsing them is part of validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StepInput {
    FsType {
        qfs: bool,
        hpc: bool,
        hafs: bool,
        shared: bool,
        archiving: bool,
        matfs: bool,
    },
    Defaults {
        accept: bool,
    },
    MetadataOptions {
        placement: MetadataPlacement,
        method: AllocationMethod,
    },
    BlockAllocation {
        blocks_per_device: String,
        block_size: String,
        block_size_unit: SizeUnit,
        striped_group_count: Option<String>,
    },
    Mount {
        fs_name: String,
        mount_point: String,
        mount_at_boot: bool,
        mount_after_create: bool,
        high_watermark: String,
        low_watermark: String,
    },
    ClusterNodes {
        selected: Vec<String>,
    },
    SharedMembers {
        metadata_server: String,
        clients: Vec<String>,
    },
    Devices {
        selected: Vec<String>,
    },
    StripedGroupCount {
        count: String,
    },
    ArchiveConfig {
        policy_type: Option<PolicyType>,
        existing_name: Option<String>,
        new_name: Option<String>,
    },
    Summary,
}

/// What a successful submit asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Move to the flow's next step.
    Advance,
    /// Stay on the current step; a pending alert explains why.
    Stay,
    /// The terminal step was acknowledged; the wizard is over.
    Finished,
}

/// Capability set implemented by every wizard page.
#[async_trait]
pub trait WizardStep: Send + Sync {
    fn id(&self) -> StepId;

    /// Declarative schema of the fields this step renders.
    fn schema(&self) -> &'static [FieldSpec];

    /// Prepare the session for display. Steps that list station resources
    /// refresh their display buffers here, on every entry.
    async fn on_enter(
        &self,
        ctx: &WizardContext,
        session: &mut WizardSession,
    ) -> WizardResult<RenderTarget>;

    /// Validate `input` and store the answers it carries.
    async fn on_submit(
        &self,
        ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome>;
}

/// Name rule shared by file systems, path components and policy names:
/// no whitespace, no leading digit, and only letters, digits, `_`, `.`
/// and `-`.
pub(crate) fn is_valid_component_name(name: &str) -> bool {
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    name.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Path rule used for mount points: every non-empty `/`-separated
/// component must be a valid name. Repeated separators are tolerated,
/// matching how the console has always parsed these.
pub(crate) fn is_well_formed_path(path: &str) -> bool {
    !path.trim().is_empty()
        && path
            .split('/')
            .filter(|component| !component.is_empty())
            .all(is_valid_component_name)
}
