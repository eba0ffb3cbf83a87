//! Test helpers: a scriptable system model and ready-made contexts.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use fs_console_model::{
    AllocatableUnit, ClusterNodeInfo, FileSystemInfo, GrowFileSystemSpec, ManagementError,
    NewFileSystemSpec, Result as ManagementResult, SystemModel,
};

use crate::catalog::InMemoryMessageCatalog;
use crate::engine::WizardContext;
use crate::session::WizardSession;

// ===== Mock system model =====

/// Scriptable [`SystemModel`] for unit tests. Every answer slot has a
/// setter, and every call has an error slot that stays armed until it is
/// cleared again.
pub struct MockSystemModel {
    api_version: RwLock<Option<String>>,
    cluster_node: RwLock<bool>,
    cluster_nodes: RwLock<Vec<String>>,
    archiving_media: RwLock<bool>,
    units: RwLock<Vec<AllocatableUnit>>,
    overlaps: RwLock<Vec<String>>,
    file_systems: RwLock<Vec<FileSystemInfo>>,
    archive_policies: RwLock<Vec<String>>,
    default_watermarks: RwLock<(u8, u8)>,
    created: RwLock<Vec<NewFileSystemSpec>>,
    grown: RwLock<Vec<GrowFileSystemSpec>>,

    version_error: RwLock<Option<ManagementError>>,
    cluster_error: RwLock<Option<ManagementError>>,
    nodes_error: RwLock<Option<ManagementError>>,
    media_error: RwLock<Option<ManagementError>>,
    units_error: RwLock<Option<ManagementError>>,
    overlap_error: RwLock<Option<ManagementError>>,
    exists_error: RwLock<Option<ManagementError>>,
    get_fs_error: RwLock<Option<ManagementError>>,
    policies_error: RwLock<Option<ManagementError>>,
    watermark_error: RwLock<Option<ManagementError>>,
    create_error: RwLock<Option<ManagementError>>,
    grow_error: RwLock<Option<ManagementError>>,
}

impl Default for MockSystemModel {
    fn default() -> Self {
        Self {
            api_version: RwLock::new(Some("1.6".to_string())),
            cluster_node: RwLock::new(false),
            cluster_nodes: RwLock::new(Vec::new()),
            archiving_media: RwLock::new(true),
            units: RwLock::new(Vec::new()),
            overlaps: RwLock::new(Vec::new()),
            file_systems: RwLock::new(Vec::new()),
            archive_policies: RwLock::new(Vec::new()),
            default_watermarks: RwLock::new((80, 60)),
            created: RwLock::new(Vec::new()),
            grown: RwLock::new(Vec::new()),
            version_error: RwLock::new(None),
            cluster_error: RwLock::new(None),
            nodes_error: RwLock::new(None),
            media_error: RwLock::new(None),
            units_error: RwLock::new(None),
            overlap_error: RwLock::new(None),
            exists_error: RwLock::new(None),
            get_fs_error: RwLock::new(None),
            policies_error: RwLock::new(None),
            watermark_error: RwLock::new(None),
            create_error: RwLock::new(None),
            grow_error: RwLock::new(None),
        }
    }
}

impl MockSystemModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Answer slots =====

    pub async fn set_api_version(&self, version: Option<&str>) {
        *self.api_version.write().await = version.map(ToString::to_string);
    }

    pub async fn set_cluster_node(&self, member: bool) {
        *self.cluster_node.write().await = member;
    }

    pub async fn set_cluster_nodes(&self, nodes: Vec<String>) {
        *self.cluster_nodes.write().await = nodes;
    }

    pub async fn set_archiving_media(&self, present: bool) {
        *self.archiving_media.write().await = present;
    }

    pub async fn set_units(&self, units: Vec<AllocatableUnit>) {
        *self.units.write().await = units;
    }

    pub async fn set_overlaps(&self, paths: Vec<String>) {
        *self.overlaps.write().await = paths;
    }

    pub async fn add_file_system(&self, info: FileSystemInfo) {
        self.file_systems.write().await.push(info);
    }

    pub async fn set_archive_policies(&self, names: Vec<String>) {
        *self.archive_policies.write().await = names;
    }

    pub async fn set_default_watermarks(&self, high: u8, low: u8) {
        *self.default_watermarks.write().await = (high, low);
    }

    pub async fn created_specs(&self) -> Vec<NewFileSystemSpec> {
        self.created.read().await.clone()
    }

    pub async fn grown_specs(&self) -> Vec<GrowFileSystemSpec> {
        self.grown.read().await.clone()
    }

    // ===== Error slots =====

    pub async fn set_version_error(&self, error: Option<ManagementError>) {
        *self.version_error.write().await = error;
    }

    pub async fn set_cluster_error(&self, error: Option<ManagementError>) {
        *self.cluster_error.write().await = error;
    }

    pub async fn set_nodes_error(&self, error: Option<ManagementError>) {
        *self.nodes_error.write().await = error;
    }

    pub async fn set_media_error(&self, error: Option<ManagementError>) {
        *self.media_error.write().await = error;
    }

    pub async fn set_units_error(&self, error: Option<ManagementError>) {
        *self.units_error.write().await = error;
    }

    pub async fn set_overlap_error(&self, error: Option<ManagementError>) {
        *self.overlap_error.write().await = error;
    }

    pub async fn set_exists_error(&self, error: Option<ManagementError>) {
        *self.exists_error.write().await = error;
    }

    pub async fn set_get_fs_error(&self, error: Option<ManagementError>) {
        *self.get_fs_error.write().await = error;
    }

    pub async fn set_policies_error(&self, error: Option<ManagementError>) {
        *self.policies_error.write().await = error;
    }

    pub async fn set_watermark_error(&self, error: Option<ManagementError>) {
        *self.watermark_error.write().await = error;
    }

    pub async fn set_create_error(&self, error: Option<ManagementError>) {
        *self.create_error.write().await = error;
    }

    pub async fn set_grow_error(&self, error: Option<ManagementError>) {
        *self.grow_error.write().await = error;
    }
}

async fn armed(slot: &RwLock<Option<ManagementError>>) -> Option<ManagementError> {
    slot.read().await.clone()
}

#[async_trait]
impl SystemModel for MockSystemModel {
    async fn server_api_version(&self, _server: &str) -> ManagementResult<Option<String>> {
        if let Some(e) = armed(&self.version_error).await {
            return Err(e);
        }
        Ok(self.api_version.read().await.clone())
    }

    async fn is_cluster_node(&self, _server: &str) -> ManagementResult<bool> {
        if let Some(e) = armed(&self.cluster_error).await {
            return Err(e);
        }
        Ok(*self.cluster_node.read().await)
    }

    async fn get_cluster_nodes(&self, _server: &str) -> ManagementResult<Vec<ClusterNodeInfo>> {
        if let Some(e) = armed(&self.nodes_error).await {
            return Err(e);
        }
        Ok(self.cluster_nodes.read().await.iter().map(ClusterNodeInfo::new).collect())
    }

    async fn has_archiving_media(&self, _server: &str) -> ManagementResult<bool> {
        if let Some(e) = armed(&self.media_error).await {
            return Err(e);
        }
        Ok(*self.archiving_media.read().await)
    }

    async fn get_allocatable_units(&self, _server: &str) -> ManagementResult<Vec<AllocatableUnit>> {
        if let Some(e) = armed(&self.units_error).await {
            return Err(e);
        }
        Ok(self.units.read().await.clone())
    }

    async fn check_slices_for_overlaps(
        &self,
        _server: &str,
        paths: &[String],
    ) -> ManagementResult<Vec<String>> {
        if let Some(e) = armed(&self.overlap_error).await {
            return Err(e);
        }
        let known = self.overlaps.read().await;
        Ok(paths.iter().filter(|p| known.contains(p)).cloned().collect())
    }

    async fn get_file_system(&self, _server: &str, fs_name: &str) -> ManagementResult<FileSystemInfo> {
        if let Some(e) = armed(&self.get_fs_error).await {
            return Err(e);
        }
        self.file_systems
            .read()
            .await
            .iter()
            .find(|f| f.name == fs_name)
            .cloned()
            .ok_or_else(|| ManagementError::new(-1121, format!("no file system named {fs_name}")))
    }

    async fn file_system_exists(&self, _server: &str, fs_name: &str) -> ManagementResult<bool> {
        if let Some(e) = armed(&self.exists_error).await {
            return Err(e);
        }
        Ok(self.file_systems.read().await.iter().any(|f| f.name == fs_name))
    }

    async fn archive_policy_names(&self, _server: &str) -> ManagementResult<Vec<String>> {
        if let Some(e) = armed(&self.policies_error).await {
            return Err(e);
        }
        Ok(self.archive_policies.read().await.clone())
    }

    async fn default_watermarks(
        &self,
        _server: &str,
        _separate_metadata: bool,
        _archiving: bool,
    ) -> ManagementResult<(u8, u8)> {
        if let Some(e) = armed(&self.watermark_error).await {
            return Err(e);
        }
        Ok(*self.default_watermarks.read().await)
    }

    async fn create_file_system(
        &self,
        _server: &str,
        spec: &NewFileSystemSpec,
    ) -> ManagementResult<()> {
        if let Some(e) = armed(&self.create_error).await {
            return Err(e);
        }
        self.created.write().await.push(spec.clone());
        Ok(())
    }

    async fn grow_file_system(
        &self,
        _server: &str,
        spec: &GrowFileSystemSpec,
    ) -> ManagementResult<()> {
        if let Some(e) = armed(&self.grow_error).await {
            return Err(e);
        }
        self.grown.write().await.push(spec.clone());
        Ok(())
    }
}

// ===== Factories =====

/// Context wired to a fresh mock and an unseeded (echoing) catalog.
pub fn test_context() -> (WizardContext, Arc<MockSystemModel>) {
    let model = Arc::new(MockSystemModel::new());
    let catalog = Arc::new(InMemoryMessageCatalog::new());
    (WizardContext::new(model.clone(), catalog), model)
}

/// Fresh session against the conventional test server.
pub fn test_session() -> WizardSession {
    WizardSession::new("test-server")
}

/// Unused disk slice of the given capacity.
pub fn unit(path: &str, capacity: u64) -> AllocatableUnit {
    AllocatableUnit::slice(path, capacity)
}

/// Minimal file-system record for exists checks and grow seeding.
pub fn fs_info(name: &str) -> FileSystemInfo {
    FileSystemInfo {
        name: name.to_string(),
        separate_metadata: false,
        mounted: false,
        shared: false,
        ha: false,
        striped_group_count: None,
        data_device_count: 0,
        metadata_device_count: 0,
    }
}
