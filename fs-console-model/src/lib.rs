//! # fs-console-model
//!
//! Management-station contract layer for the SAM-QFS file-system console.
//!
//! The console never touches devices or file systems itself; everything it
//! does goes through a management station reachable per server. This crate
//! defines that boundary:
//!
//! - [`SystemModel`]: the station operations the console consumes
//!   (discovery queries plus the create/grow execution calls)
//! - [`ManagementError`]: the station failure shape with its well-known
//!   code classification
//! - Device, file-system, and cluster data types
//! - Pure helpers for version gating and device-type display labels
//! - [`InMemorySystemModel`]: a self-contained station for embedding and
//!   tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fs_console_model::{InMemorySystemModel, ServerSeed, SystemModel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = InMemorySystemModel::new();
//!     model
//!         .add_server(
//!             "stor-01",
//!             ServerSeed {
//!                 api_version: Some("1.6.2".to_string()),
//!                 ..ServerSeed::default()
//!             },
//!         )
//!         .await;
//!
//!     let version = model.server_api_version("stor-01").await?;
//!     println!("stor-01 speaks API {version:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All station operations return [`Result<T, ManagementError>`](ManagementError).
//! A handful of codes are well known and drive alert rendering in the
//! console; [`ManagementError::kind`] classifies them:
//!
//! - `30806`: request timed out
//! - `30807`: network down
//! - `-2800`: management station down
//! - `-2803`: access denied

mod error;
mod media;
mod memory;
mod traits;
mod types;
mod version;

// Re-export error types
pub use error::{ErrorKind, ManagementError, Result};

// Re-export the station trait and its in-memory implementation
pub use memory::{InMemorySystemModel, ServerSeed};
pub use traits::SystemModel;

// Re-export types
pub use types::{
    AllocatableUnit, ArchivePolicy, ClusterNodeInfo, DeviceKind, FileSystemInfo,
    GrowFileSystemSpec, NewFileSystemSpec,
};

// Re-export pure helpers
pub use media::{device_type, device_type_label, disk_cache_type_label};
pub use version::{
    api_version_from_ui_version, normalized_api_version, version_at_least, DEFAULT_API_VERSION,
};
