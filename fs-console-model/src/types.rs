//! Data types exchanged with the management station

use serde::{Deserialize, Serialize};

/// Kind of an allocatable disk unit discovered on a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Raw disk slice
    Slice,
    /// Solaris Volume Manager volume
    Svm,
    /// Veritas volume
    Vxvm,
    /// ZFS volume
    Zvol,
}

/// A disk unit eligible for selection as a data or metadata device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatableUnit {
    /// Device path as the station reports it
    pub path: String,
    /// Unit kind
    pub kind: DeviceKind,
    /// Raw capacity in bytes
    pub capacity: u64,
    /// Name of the file system already occupying this unit, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_by: Option<String>,
    /// RAID level reported by the volume manager, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raid_level: Option<String>,
}

impl AllocatableUnit {
    /// Convenience constructor for a plain slice with no current user
    #[must_use]
    pub fn slice(path: impl Into<String>, capacity: u64) -> Self {
        Self {
            path: path.into(),
            kind: DeviceKind::Slice,
            capacity,
            used_by: None,
            raid_level: None,
        }
    }
}

/// Shape of an existing file system as reported by the station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemInfo {
    /// File-system name
    pub name: String,
    /// Whether metadata lives on devices separate from data
    pub separate_metadata: bool,
    /// Whether the file system is currently mounted
    pub mounted: bool,
    /// Whether the file system is shared across hosts
    pub shared: bool,
    /// Whether the file system is under high-availability control
    pub ha: bool,
    /// Number of striped groups; `None` for file systems that do not stripe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub striped_group_count: Option<u32>,
    /// Data devices currently in use
    pub data_device_count: u32,
    /// Metadata devices currently in use
    pub metadata_device_count: u32,
}

/// Cluster node as reported by the station. Read-only; the console never
/// mutates cluster membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterNodeInfo {
    /// Node host name
    pub name: String,
}

impl ClusterNodeInfo {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Archive policy binding for a new archiving file system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchivePolicy {
    /// Attach an already-configured policy
    Existing {
        /// Name of the existing policy
        name: String,
    },
    /// Create and attach a new policy
    New {
        /// Name for the new policy
        name: String,
    },
}

/// Everything the station needs to create a file system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFileSystemSpec {
    /// File-system name
    pub name: String,
    /// True for a QFS file system, false for a plain UFS
    pub qfs: bool,
    /// Shared across hosts
    pub shared: bool,
    /// High-performance-computing variant
    pub hpc: bool,
    /// Under high-availability control
    pub ha: bool,
    /// Archiving enabled
    pub archiving: bool,
    /// Metadata-archiving target variant
    pub matfs: bool,
    /// Absolute mount point
    pub mount_point: String,
    /// Mount at boot time
    pub mount_at_boot: bool,
    /// Mount once creation finishes
    pub mount_after_create: bool,
    /// Device allocation unit size in kilobytes, when tuned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size_kb: Option<u32>,
    /// Blocks written per device before moving to the next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks_per_device: Option<u8>,
    /// Release threshold in percent, archiving file systems only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_watermark: Option<u8>,
    /// Stop-release threshold in percent, archiving file systems only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_watermark: Option<u8>,
    /// Devices dedicated to metadata, empty when metadata shares data devices
    pub metadata_devices: Vec<String>,
    /// Data devices, empty when striped groups are used instead
    pub data_devices: Vec<String>,
    /// Striped groups, each a set of equally sized devices
    pub striped_groups: Vec<Vec<String>>,
    /// Cluster nodes hosting the file system, HA runs only
    pub cluster_nodes: Vec<String>,
    /// Primary metadata server, shared runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_metadata_server: Option<String>,
    /// Client hosts, shared runs only
    pub shared_clients: Vec<String>,
    /// Archive policy to attach, archiving runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_policy: Option<ArchivePolicy>,
}

/// Everything the station needs to grow an existing file system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowFileSystemSpec {
    /// File-system name
    pub name: String,
    /// Metadata devices to add
    pub metadata_devices: Vec<String>,
    /// Data devices to add
    pub data_devices: Vec<String>,
    /// Striped groups to add
    pub striped_groups: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocatable_unit_slice_constructor() {
        let unit = AllocatableUnit::slice("/dev/dsk/c0t0d0s3", 1 << 30);
        assert_eq!(unit.kind, DeviceKind::Slice);
        assert!(unit.used_by.is_none());
        assert!(unit.raid_level.is_none());
    }

    #[test]
    fn new_spec_serializes_camel_case() {
        let spec = NewFileSystemSpec {
            name: "qfs1".to_string(),
            qfs: true,
            mount_point: "/qfs1".to_string(),
            ..NewFileSystemSpec::default()
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"mountPoint\":\"/qfs1\""));
        assert!(json.contains("\"mountAtBoot\":false"));
        // unset optionals stay off the wire
        assert!(!json.contains("blockSizeKb"));
    }

    #[test]
    fn archive_policy_tags_lowercase() {
        let policy = ArchivePolicy::Existing {
            name: "no_archive".to_string(),
        };
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("existing"));
    }
}
