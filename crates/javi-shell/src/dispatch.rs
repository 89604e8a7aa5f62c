use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::task::JoinHandle;

use javi_backend::{BackendError, RawVersion, VersionManager};

/// Applies a version to the developer's environment.
#[async_trait]
pub trait ShellDispatcher: Send + Sync {
    async fn dispatch_use(&self, version: &RawVersion, cwd: Option<&Path>)
    -> Result<(), BackendError>;
}

/// A `use` command running in the background.
///
/// Dropping the handle detaches the command; awaiting [`DispatchHandle::wait`]
/// observes its outcome.
#[derive(Debug)]
pub struct DispatchHandle {
    version: RawVersion,
    task: JoinHandle<Result<(), BackendError>>,
}

impl DispatchHandle {
    /// Start `dispatcher.dispatch_use` on the runtime without waiting for it.
    pub fn spawn(
        dispatcher: Arc<dyn ShellDispatcher>,
        version: RawVersion,
        cwd: Option<PathBuf>,
    ) -> Self {
        let task_version = version.clone();
        let task = tokio::spawn(async move {
            let result = dispatcher
                .dispatch_use(&task_version, cwd.as_deref())
                .await;
            match &result {
                Ok(()) => debug!("Dispatched use of {task_version}"),
                Err(error) => warn!("Dispatching use of {task_version} failed: {error}"),
            }
            result
        });
        Self { version, task }
    }

    #[must_use]
    pub fn version(&self) -> &RawVersion {
        &self.version
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the command to finish.
    ///
    /// # Errors
    /// Returns the command's own error, or a backend error if the task
    /// panicked or was cancelled.
    pub async fn wait(self) -> Result<(), BackendError> {
        self.task
            .await
            .map_err(|error| BackendError::backend_specific("dispatch use", error.to_string()))?
    }
}

/// The line that switches the shell it is typed into. jabba is a shell
/// function, so only the user's own shell can evaluate it.
#[must_use]
pub fn use_command(version: &RawVersion) -> String {
    format!("jabba use {version}")
}

/// Applies versions through the version manager.
///
/// `use` runs in a child process and cannot reach the caller's shell, so the
/// version is also made the default alias, which every new shell activates
/// on start. The caller hands [`use_command`] to the user for the shell that
/// is already open.
#[derive(Clone)]
pub struct BackendDispatcher {
    manager: Box<dyn VersionManager>,
}

impl BackendDispatcher {
    #[must_use]
    pub fn new(manager: Box<dyn VersionManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl ShellDispatcher for BackendDispatcher {
    async fn dispatch_use(
        &self,
        version: &RawVersion,
        cwd: Option<&Path>,
    ) -> Result<(), BackendError> {
        self.manager.use_version(version, cwd).await?;
        self.manager.set_default(version).await
    }
}
