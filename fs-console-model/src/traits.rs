//! Management-station abstract trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AllocatableUnit, ClusterNodeInfo, FileSystemInfo, GrowFileSystemSpec, NewFileSystemSpec,
};

/// Operations the console issues against one management station.
///
/// Every query takes the target server name so a single implementation can
/// front a whole fleet. Implementations talk to a live station;
/// `InMemorySystemModel` is a self-contained implementation for embedding
/// and tests.
#[async_trait]
pub trait SystemModel: Send + Sync {
    /// Management API version reported by the server, `None` when the server
    /// cannot report one
    async fn server_api_version(&self, server: &str) -> Result<Option<String>>;

    /// Whether the server participates in a cluster
    async fn is_cluster_node(&self, server: &str) -> Result<bool>;

    /// Nodes of the cluster the server belongs to, fetched fresh per call
    async fn get_cluster_nodes(&self, server: &str) -> Result<Vec<ClusterNodeInfo>>;

    /// Whether any archiving-capable media is configured on the server
    async fn has_archiving_media(&self, server: &str) -> Result<bool>;

    /// Disk units eligible as data or metadata devices
    async fn get_allocatable_units(&self, server: &str) -> Result<Vec<AllocatableUnit>>;

    /// Returns the subset of `paths` that overlap slices already in use
    async fn check_slices_for_overlaps(
        &self,
        server: &str,
        paths: &[String],
    ) -> Result<Vec<String>>;

    /// Shape of an existing file system
    async fn get_file_system(&self, server: &str, fs_name: &str) -> Result<FileSystemInfo>;

    /// Whether a file system with this name already exists on the server
    async fn file_system_exists(&self, server: &str, fs_name: &str) -> Result<bool>;

    /// Names of the archive policies configured on the server
    async fn archive_policy_names(&self, server: &str) -> Result<Vec<String>>;

    /// Station defaults for the high and low watermarks of a new archiving
    /// file system, as `(high, low)` percentages
    async fn default_watermarks(
        &self,
        server: &str,
        separate_metadata: bool,
        archiving: bool,
    ) -> Result<(u8, u8)>;

    /// Create a file system; returns once the station has committed it
    async fn create_file_system(&self, server: &str, spec: &NewFileSystemSpec) -> Result<()>;

    /// Grow an existing file system by the devices named in `spec`
    async fn grow_file_system(&self, server: &str, spec: &GrowFileSystemSpec) -> Result<()>;
}
