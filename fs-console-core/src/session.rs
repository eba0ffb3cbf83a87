//! Per-invocation wizard session state.
//!
//! One [`WizardSession`] lives for the duration of a single wizard run.
//! Steps read earlier answers from it, write their own into it, and hand
//! failures to it through the pending-error protocol. Nothing here is
//! persisted; closing the wizard discards the session.

use chrono::{DateTime, Utc};
use fs_console_model::{AllocatableUnit, ArchivePolicy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alert::ErrorState;

/// File-system family chosen on the type step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FsKind {
    Qfs,
    Ufs,
}

/// Where metadata lives relative to file data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataPlacement {
    Same,
    Separate,
}

/// How blocks are spread across data devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationMethod {
    Single,
    Dual,
    Striped,
}

/// Whether an archive policy is reused or created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyType {
    Existing,
    New,
}

/// How the summary step's backend call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinishOutcome {
    Success,
    Warning,
    Failed,
}

/// Outcome record the result step displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishResult {
    pub outcome: FinishOutcome,
    /// Resolved detail text for the success banner; empty for failures,
    /// whose text travels through the pending-error protocol instead.
    pub detail: String,
    pub code: Option<i32>,
}

/// Shared state for one wizard run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSession {
    /// Unique id of this wizard invocation.
    pub instance_id: Uuid,
    /// When the wizard was started.
    pub started_at: DateTime<Utc>,
    /// Server this wizard operates against.
    pub server_name: String,
    /// Management API version that server reported, unqueried when `None`.
    pub api_version: Option<String>,

    // Answers from the type step.
    pub fs_kind: FsKind,
    pub hpc: bool,
    pub hafs: bool,
    pub shared: bool,
    pub archiving: bool,
    pub matfs: bool,

    /// The HA choice is only offered when the server is a cluster node.
    pub hafs_available: bool,
    /// HPC and MAT-FS require a recent enough management API.
    pub hpc_matfs_available: bool,
    /// Archiving stays selectable without media; the type step flags the
    /// gap so the page can warn.
    pub archiving_media_missing: bool,

    // Allocation answers.
    pub accept_defaults: Option<bool>,
    pub metadata_placement: Option<MetadataPlacement>,
    pub allocation_method: Option<AllocationMethod>,
    pub blocks_per_device: Option<u8>,
    pub block_size_kb: Option<u32>,
    /// Groups the user asked for. In the grow flow this counts new groups
    /// on top of [`Self::existing_striped_groups`].
    pub striped_group_count: Option<u32>,

    // Grow bookkeeping, seeded from the file system being grown.
    pub existing_striped_groups: Option<u32>,
    pub available_striped_groups: Option<u32>,
    pub available_devices: Option<usize>,

    // Mount answers.
    pub fs_name: Option<String>,
    pub mount_point: Option<String>,
    pub mount_at_boot: bool,
    pub mount_after_create: bool,
    pub high_watermark: Option<u8>,
    pub low_watermark: Option<u8>,

    // Membership answers.
    pub cluster_nodes: Vec<String>,
    pub shared_metadata_server: Option<String>,
    pub shared_clients: Vec<String>,

    // Device answers.
    pub metadata_devices: Vec<String>,
    pub data_devices: Vec<String>,
    pub striped_group_devices: Vec<Vec<String>>,

    // Display buffers, refreshed by the owning step on every entry.
    pub available_cluster_nodes: Vec<String>,
    pub available_units: Vec<AllocatableUnit>,
    pub available_policies: Vec<String>,
    pub default_policy_type: Option<PolicyType>,

    pub archive_policy: Option<ArchivePolicy>,

    /// Set once the summary step has executed its backend call.
    pub finish: Option<FinishResult>,

    error: ErrorState,
}

impl WizardSession {
    #[must_use]
    pub fn new(server_name: impl Into<String>) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            started_at: Utc::now(),
            server_name: server_name.into(),
            api_version: None,
            fs_kind: FsKind::Qfs,
            hpc: false,
            hafs: false,
            shared: false,
            archiving: false,
            matfs: false,
            hafs_available: false,
            hpc_matfs_available: false,
            archiving_media_missing: false,
            accept_defaults: None,
            metadata_placement: None,
            allocation_method: None,
            blocks_per_device: None,
            block_size_kb: None,
            striped_group_count: None,
            existing_striped_groups: None,
            available_striped_groups: None,
            available_devices: None,
            fs_name: None,
            mount_point: None,
            mount_at_boot: false,
            mount_after_create: false,
            high_watermark: None,
            low_watermark: None,
            cluster_nodes: Vec::new(),
            shared_metadata_server: None,
            shared_clients: Vec::new(),
            metadata_devices: Vec::new(),
            data_devices: Vec::new(),
            striped_group_devices: Vec::new(),
            available_cluster_nodes: Vec::new(),
            available_units: Vec::new(),
            available_policies: Vec::new(),
            default_policy_type: None,
            archive_policy: None,
            finish: None,
            error: ErrorState::default(),
        }
    }

    /// Record a failure for the next render cycle. A later failure in the
    /// same cycle replaces an earlier one.
    pub fn record_error(&mut self, state: ErrorState) {
        self.error = state;
    }

    /// Take the pending failure, clearing it. Rendering the same step
    /// twice therefore shows the alert exactly once.
    pub fn take_error(&mut self) -> Option<ErrorState> {
        if self.error.present {
            Some(std::mem::take(&mut self.error))
        } else {
            None
        }
    }

    /// Peek at the pending failure without consuming it.
    #[must_use]
    pub fn pending_error(&self) -> Option<&ErrorState> {
        self.error.present.then_some(&self.error)
    }

    #[must_use]
    pub fn separate_metadata(&self) -> bool {
        self.metadata_placement == Some(MetadataPlacement::Separate)
    }

    #[must_use]
    pub fn striped(&self) -> bool {
        self.allocation_method == Some(AllocationMethod::Striped)
    }

    /// Devices selected so far across every class, leaving out the slot
    /// `exclude` names so a re-submitted page does not count its own old
    /// selection.
    #[must_use]
    pub fn devices_selected_except(&self, exclude: DeviceSlot) -> usize {
        let mut total = 0;
        if exclude != DeviceSlot::Metadata {
            total += self.metadata_devices.len();
        }
        if exclude != DeviceSlot::Data {
            total += self.data_devices.len();
        }
        for (index, group) in self.striped_group_devices.iter().enumerate() {
            if exclude != DeviceSlot::StripedGroup(index) {
                total += group.len();
            }
        }
        total
    }
}

/// Which device-selection slot a page writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceSlot {
    Metadata,
    Data,
    StripedGroup(usize),
}
