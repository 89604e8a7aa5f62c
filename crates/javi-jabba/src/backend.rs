use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};

use javi_backend::{BackendError, BackendInfo, MARKER_FILE_NAME, RawVersion, VersionManager};

use crate::client::{CommandTimeouts, JabbaClient, JabbaEnvironment};

#[derive(Debug, Clone)]
pub struct JabbaBackend {
    info: BackendInfo,
    client: JabbaClient,
}

impl JabbaBackend {
    #[must_use]
    pub fn new(client: JabbaClient, version: Option<String>) -> Self {
        let (path, data_dir) = match &client.environment {
            JabbaEnvironment::Unix { jabba_home } => {
                (jabba_home.join("jabba.sh"), Some(jabba_home.clone()))
            }
            JabbaEnvironment::Windows { jabba_exe } => (
                jabba_exe.clone(),
                jabba_exe
                    .parent()
                    .and_then(Path::parent)
                    .map(Path::to_path_buf),
            ),
        };

        Self {
            info: BackendInfo {
                name: "jabba",
                path,
                version,
                data_dir,
                in_path: true,
            },
            client,
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: CommandTimeouts) -> Self {
        self.client = self.client.with_timeouts(timeouts);
        self
    }
}

#[async_trait]
impl VersionManager for JabbaBackend {
    fn name(&self) -> &'static str {
        "jabba"
    }

    fn backend_info(&self) -> &BackendInfo {
        &self.info
    }

    async fn list_installed(&self) -> Result<Vec<RawVersion>, BackendError> {
        debug!("jabba: listing installed versions");
        self.client.list_installed().await
    }

    async fn list_remote(&self, filter: Option<&str>) -> Result<Vec<RawVersion>, BackendError> {
        debug!("jabba: listing remote versions (filter={filter:?})");
        self.client.list_remote(filter).await
    }

    async fn install(&self, version: &RawVersion) -> Result<(), BackendError> {
        info!("jabba: installing version {version}");
        self.client.install(version).await
    }

    async fn uninstall(&self, version: &RawVersion) -> Result<(), BackendError> {
        info!("jabba: uninstalling version {version}");
        self.client.uninstall(version).await
    }

    async fn use_version(
        &self,
        version: &RawVersion,
        cwd: Option<&Path>,
    ) -> Result<(), BackendError> {
        info!("jabba: using version {version}");
        self.client.use_version(version, cwd).await
    }

    async fn set_default(&self, version: &RawVersion) -> Result<(), BackendError> {
        info!("jabba: setting default version to {version}");
        self.client.set_default(version).await
    }

    async fn current_global(&self) -> Result<Option<RawVersion>, BackendError> {
        debug!("jabba: getting current version");
        self.client.current().await
    }

    /// jabba keeps the per-directory choice in the marker file itself.
    async fn current_local(&self, cwd: &Path) -> Result<Option<RawVersion>, BackendError> {
        let path: PathBuf = cwd.join(MARKER_FILE_NAME);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let value = content.trim();
                Ok((!value.is_empty()).then(|| RawVersion::from(value)))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}
