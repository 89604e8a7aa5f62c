use async_trait::async_trait;
use std::path::PathBuf;

use javi_backend::{BackendDetection, BackendProvider, VersionManager};

use crate::backend::JabbaBackend;
use crate::client::{CommandTimeouts, JabbaClient, JabbaEnvironment};
use crate::detection::{detect_jabba, environment_for};

#[derive(Debug, Default)]
pub struct JabbaProvider {
    configured_home: Option<PathBuf>,
    timeouts: CommandTimeouts,
}

impl JabbaProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.configured_home = home;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: CommandTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

#[async_trait]
impl BackendProvider for JabbaProvider {
    fn name(&self) -> &'static str {
        "jabba"
    }

    fn display_name(&self) -> &'static str {
        "jabba (Java Version Manager)"
    }

    fn shell_config_marker(&self) -> &'static str {
        "jabba.sh"
    }

    fn shell_config_label(&self) -> &'static str {
        "jabba (Java Version Manager)"
    }

    async fn detect(&self) -> BackendDetection {
        let detection = detect_jabba(self.configured_home.as_deref()).await;

        BackendDetection {
            found: detection.found,
            path: detection.jabba_exe.or_else(|| {
                detection
                    .jabba_home
                    .as_ref()
                    .map(|home| home.join("jabba.sh"))
            }),
            version: detection.version,
            in_path: detection.in_path,
            data_dir: detection.jabba_home,
        }
    }

    fn create_manager(&self, detection: &BackendDetection) -> Box<dyn VersionManager> {
        let on_path = detection
            .path
            .as_ref()
            .filter(|path| path.file_name().is_some_and(|name| name != "jabba.sh"));

        let environment = environment_for(detection.data_dir.as_deref(), on_path.map(PathBuf::as_path))
            .unwrap_or_else(|| JabbaEnvironment::Unix {
                jabba_home: detection
                    .data_dir
                    .clone()
                    .or_else(javi_platform::default_jabba_home)
                    .unwrap_or_else(|| PathBuf::from(".jabba")),
            });

        let client = JabbaClient {
            environment,
            timeouts: self.timeouts,
        };

        Box::new(JabbaBackend::new(client, detection.version.clone()))
    }
}
