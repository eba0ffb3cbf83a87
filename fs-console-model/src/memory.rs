//! In-memory management station

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ManagementError, Result};
use crate::traits::SystemModel;
use crate::types::{
    AllocatableUnit, ClusterNodeInfo, FileSystemInfo, GrowFileSystemSpec, NewFileSystemSpec,
};

/// Station code used when a create names an already existing file system
const FS_EXISTS: i32 = -1120;
/// Station code used when a grow names an unknown file system
const FS_NOT_FOUND: i32 = -1121;

/// Initial state of one server managed by [`InMemorySystemModel`].
#[derive(Debug, Clone)]
pub struct ServerSeed {
    /// Reported management API version
    pub api_version: Option<String>,
    /// Whether the server participates in a cluster
    pub cluster_node: bool,
    /// Node names of that cluster
    pub cluster_nodes: Vec<String>,
    /// Whether archiving-capable media is configured
    pub archiving_media: bool,
    /// Discovered allocatable units
    pub units: Vec<AllocatableUnit>,
    /// Device paths that overlap slices already in use
    pub overlapping_paths: Vec<String>,
    /// Configured archive policy names
    pub archive_policies: Vec<String>,
    /// Default high watermark in percent
    pub default_high_watermark: u8,
    /// Default low watermark in percent
    pub default_low_watermark: u8,
}

impl Default for ServerSeed {
    fn default() -> Self {
        Self {
            api_version: None,
            cluster_node: false,
            cluster_nodes: Vec::new(),
            archiving_media: false,
            units: Vec::new(),
            overlapping_paths: Vec::new(),
            archive_policies: Vec::new(),
            default_high_watermark: 80,
            default_low_watermark: 60,
        }
    }
}

struct ServerEntry {
    seed: ServerSeed,
    file_systems: HashMap<String, FileSystemInfo>,
}

/// In-memory system model
///
/// Self-contained implementation for hosts without a live management station
/// and for tests. Queries against a server that was never added fail with the
/// station-down code, the same way a dead station would.
#[derive(Clone)]
pub struct InMemorySystemModel {
    servers: Arc<RwLock<HashMap<String, ServerEntry>>>,
}

impl InMemorySystemModel {
    /// Create an empty model with no servers
    #[must_use]
    pub fn new() -> Self {
        Self {
            servers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add a server with the given initial state, replacing any previous
    /// entry under the same name
    pub async fn add_server(&self, name: impl Into<String>, seed: ServerSeed) {
        self.servers.write().await.insert(
            name.into(),
            ServerEntry {
                seed,
                file_systems: HashMap::new(),
            },
        );
    }

    /// Remove a server, making later queries against it fail station-down
    pub async fn remove_server(&self, name: &str) {
        self.servers.write().await.remove(name);
    }

    /// Register an existing file system on a server
    pub async fn add_file_system(&self, server: &str, info: FileSystemInfo) -> Result<()> {
        let mut servers = self.servers.write().await;
        let entry = servers
            .get_mut(server)
            .ok_or_else(ManagementError::server_down)?;
        entry.file_systems.insert(info.name.clone(), info);
        Ok(())
    }

    /// Replace the set of device paths considered overlapping on a server
    pub async fn set_overlapping_paths(&self, server: &str, paths: Vec<String>) -> Result<()> {
        let mut servers = self.servers.write().await;
        let entry = servers
            .get_mut(server)
            .ok_or_else(ManagementError::server_down)?;
        entry.seed.overlapping_paths = paths;
        Ok(())
    }

    async fn with_server<T>(
        &self,
        server: &str,
        f: impl FnOnce(&ServerEntry) -> T + Send,
    ) -> Result<T> {
        let servers = self.servers.read().await;
        servers
            .get(server)
            .map(f)
            .ok_or_else(ManagementError::server_down)
    }
}

impl Default for InMemorySystemModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemModel for InMemorySystemModel {
    async fn server_api_version(&self, server: &str) -> Result<Option<String>> {
        self.with_server(server, |e| e.seed.api_version.clone())
            .await
    }

    async fn is_cluster_node(&self, server: &str) -> Result<bool> {
        self.with_server(server, |e| e.seed.cluster_node).await
    }

    async fn get_cluster_nodes(&self, server: &str) -> Result<Vec<ClusterNodeInfo>> {
        self.with_server(server, |e| {
            e.seed
                .cluster_nodes
                .iter()
                .map(ClusterNodeInfo::new)
                .collect()
        })
        .await
    }

    async fn has_archiving_media(&self, server: &str) -> Result<bool> {
        self.with_server(server, |e| e.seed.archiving_media).await
    }

    async fn get_allocatable_units(&self, server: &str) -> Result<Vec<AllocatableUnit>> {
        self.with_server(server, |e| e.seed.units.clone()).await
    }

    async fn check_slices_for_overlaps(
        &self,
        server: &str,
        paths: &[String],
    ) -> Result<Vec<String>> {
        self.with_server(server, |e| {
            paths
                .iter()
                .filter(|p| e.seed.overlapping_paths.contains(p))
                .cloned()
                .collect()
        })
        .await
    }

    async fn get_file_system(&self, server: &str, fs_name: &str) -> Result<FileSystemInfo> {
        self.with_server(server, |e| e.file_systems.get(fs_name).cloned())
            .await?
            .ok_or_else(|| {
                ManagementError::new(FS_NOT_FOUND, format!("file system {fs_name} not found"))
            })
    }

    async fn file_system_exists(&self, server: &str, fs_name: &str) -> Result<bool> {
        self.with_server(server, |e| e.file_systems.contains_key(fs_name))
            .await
    }

    async fn archive_policy_names(&self, server: &str) -> Result<Vec<String>> {
        self.with_server(server, |e| e.seed.archive_policies.clone())
            .await
    }

    async fn default_watermarks(
        &self,
        server: &str,
        _separate_metadata: bool,
        _archiving: bool,
    ) -> Result<(u8, u8)> {
        self.with_server(server, |e| {
            (e.seed.default_high_watermark, e.seed.default_low_watermark)
        })
        .await
    }

    async fn create_file_system(&self, server: &str, spec: &NewFileSystemSpec) -> Result<()> {
        let mut servers = self.servers.write().await;
        let entry = servers
            .get_mut(server)
            .ok_or_else(ManagementError::server_down)?;
        if entry.file_systems.contains_key(&spec.name) {
            return Err(ManagementError::new(
                FS_EXISTS,
                format!("file system {} already exists", spec.name),
            ));
        }
        let striped_group_count = if spec.striped_groups.is_empty() {
            None
        } else {
            Some(u32::try_from(spec.striped_groups.len()).unwrap_or(u32::MAX))
        };
        let data_device_count = spec.data_devices.len()
            + spec.striped_groups.iter().map(Vec::len).sum::<usize>();
        entry.file_systems.insert(
            spec.name.clone(),
            FileSystemInfo {
                name: spec.name.clone(),
                separate_metadata: !spec.metadata_devices.is_empty(),
                mounted: spec.mount_after_create,
                shared: spec.shared,
                ha: spec.ha,
                striped_group_count,
                data_device_count: u32::try_from(data_device_count).unwrap_or(u32::MAX),
                metadata_device_count: u32::try_from(spec.metadata_devices.len())
                    .unwrap_or(u32::MAX),
            },
        );
        Ok(())
    }

    async fn grow_file_system(&self, server: &str, spec: &GrowFileSystemSpec) -> Result<()> {
        let mut servers = self.servers.write().await;
        let entry = servers
            .get_mut(server)
            .ok_or_else(ManagementError::server_down)?;
        let info = entry.file_systems.get_mut(&spec.name).ok_or_else(|| {
            ManagementError::new(FS_NOT_FOUND, format!("file system {} not found", spec.name))
        })?;
        let added_data =
            spec.data_devices.len() + spec.striped_groups.iter().map(Vec::len).sum::<usize>();
        info.data_device_count += u32::try_from(added_data).unwrap_or(u32::MAX);
        info.metadata_device_count += u32::try_from(spec.metadata_devices.len()).unwrap_or(0);
        if !spec.striped_groups.is_empty() {
            let added = u32::try_from(spec.striped_groups.len()).unwrap_or(0);
            info.striped_group_count = Some(info.striped_group_count.unwrap_or(0) + added);
        }
        Ok(())
    }
}
