use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use javi_backend::{BackendProvider, VersionManager, VersionManagerClone};
use javi_core::{EnvironmentReconciler, FileMarkerStore};
use javi_jabba::{JabbaProvider, JavaRuntimeProbe};
use javi_platform::AppPaths;
use javi_shell::BackendDispatcher;

use crate::async_helpers::run_with_timeout;
use crate::error::AppError;
use crate::settings::AppSettings;

/// Everything a command needs: resolved paths, settings and the project it
/// operates on.
pub struct AppContext {
    pub paths: AppPaths,
    pub settings: AppSettings,
    pub project_root: PathBuf,
}

impl AppContext {
    pub fn new(
        paths: AppPaths,
        settings: AppSettings,
        project: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        let project_root = match project {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(AppError::environment_unavailable)?,
        };

        if !project_root.is_dir() {
            return Err(AppError::message(format!(
                "Project directory {} does not exist",
                project_root.display()
            )));
        }

        Ok(Self {
            paths,
            settings,
            project_root,
        })
    }

    fn provider(&self) -> JabbaProvider {
        JabbaProvider::new()
            .with_home(self.settings.jabba_home.clone())
            .with_timeouts(self.settings.command_timeouts())
    }

    /// Detects jabba and builds a manager for it.
    pub async fn manager(&self) -> Result<Box<dyn VersionManager>, AppError> {
        let provider = self.provider();
        let timeout = self.settings.command_timeouts().fetch;

        let detection = run_with_timeout(
            timeout,
            "jabba detection",
            async { Ok::<_, AppError>(provider.detect().await) },
            |error| error,
        )
        .await?;

        if !detection.found {
            debug!("jabba not detected: {detection:?}");
            return Err(AppError::ToolUnavailable);
        }

        Ok(provider.create_manager(&detection))
    }

    pub fn marker(&self) -> FileMarkerStore {
        FileMarkerStore::in_dir(&self.project_root)
    }

    pub fn reconciler(&self, manager: &dyn VersionManager) -> EnvironmentReconciler {
        let probe = JavaRuntimeProbe::new(
            java_executable(std::env::var_os("JAVA_HOME").map(PathBuf::from).as_deref()),
            self.settings.command_timeouts().fetch,
        );

        EnvironmentReconciler::new(
            Arc::new(self.marker()),
            Arc::new(probe),
            Arc::new(BackendDispatcher::new(manager.clone_box())),
        )
        .with_working_dir(self.project_root.clone())
        .with_cooldown(self.settings.apply_cooldown())
    }
}

/// `$JAVA_HOME/bin/java` when it exists, otherwise whatever `java` resolves
/// to on `PATH`.
fn java_executable(java_home: Option<&Path>) -> PathBuf {
    let binary = if cfg!(windows) { "java.exe" } else { "java" };

    java_home
        .map(|home| home.join("bin").join(binary))
        .filter(|path| path.is_file())
        .unwrap_or_else(|| PathBuf::from("java"))
}
