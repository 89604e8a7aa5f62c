use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::BackendError;
use crate::types::RawVersion;

#[derive(Debug, Clone)]
pub struct BackendDetection {
    pub found: bool,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
    pub in_path: bool,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct BackendInfo {
    pub name: &'static str,
    pub path: PathBuf,
    pub version: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub in_path: bool,
}

#[async_trait]
pub trait BackendProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn display_name(&self) -> &'static str;
    /// Text whose presence in a shell profile means the tool is initialised.
    fn shell_config_marker(&self) -> &str;
    fn shell_config_label(&self) -> &str;
    async fn detect(&self) -> BackendDetection;
    fn create_manager(&self, detection: &BackendDetection) -> Box<dyn VersionManager>;
}

/// Capabilities of the external version-manager tool.
///
/// Tokens go in and out exactly as the tool understands them.
#[async_trait]
pub trait VersionManager: Send + Sync + VersionManagerClone {
    fn name(&self) -> &'static str;

    fn backend_info(&self) -> &BackendInfo;

    async fn list_installed(&self) -> Result<Vec<RawVersion>, BackendError>;

    /// Remote versions, optionally narrowed by a tool-side filter such as
    /// `openjdk@17`.
    async fn list_remote(&self, filter: Option<&str>) -> Result<Vec<RawVersion>, BackendError>;

    async fn install(&self, version: &RawVersion) -> Result<(), BackendError>;

    async fn uninstall(&self, version: &RawVersion) -> Result<(), BackendError>;

    async fn use_version(
        &self,
        version: &RawVersion,
        cwd: Option<&Path>,
    ) -> Result<(), BackendError>;

    async fn set_default(&self, version: &RawVersion) -> Result<(), BackendError>;

    async fn current_global(&self) -> Result<Option<RawVersion>, BackendError>;

    async fn current_local(&self, _cwd: &Path) -> Result<Option<RawVersion>, BackendError> {
        Err(BackendError::Unsupported {
            operation: "current_local",
        })
    }
}

/// Reports the Java runtime that is active in the user's environment.
#[async_trait]
pub trait RuntimeProbe: Send + Sync {
    /// Free-form output of the runtime's version query, or `None` when no
    /// runtime could be run.
    async fn active_runtime_report(&self) -> Result<Option<String>, BackendError>;
}

pub trait VersionManagerClone: Send + Sync {
    fn clone_box(&self) -> Box<dyn VersionManager>;
}

impl<T> VersionManagerClone for T
where
    T: 'static + VersionManager + Clone,
{
    fn clone_box(&self) -> Box<dyn VersionManager> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn VersionManager> {
    fn clone(&self) -> Box<dyn VersionManager> {
        self.clone_box()
    }
}

impl<T: VersionManager + Clone + 'static> From<T> for Box<dyn VersionManager> {
    fn from(manager: T) -> Self {
        Box::new(manager)
    }
}
