use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};
use tokio::process::Command;

use javi_backend::{BackendError, RuntimeProbe};
use javi_platform::HideWindow;

/// Runs `java -version` and hands back everything it printed.
///
/// The JVM writes its banner to stderr, so both streams are merged.
#[derive(Debug, Clone)]
pub struct JavaRuntimeProbe {
    java: PathBuf,
    timeout: Duration,
}

impl Default for JavaRuntimeProbe {
    fn default() -> Self {
        Self {
            java: PathBuf::from("java"),
            timeout: Duration::from_secs(30),
        }
    }
}

impl JavaRuntimeProbe {
    #[must_use]
    pub fn new(java: PathBuf, timeout: Duration) -> Self {
        Self { java, timeout }
    }
}

#[async_trait]
impl RuntimeProbe for JavaRuntimeProbe {
    async fn active_runtime_report(&self) -> Result<Option<String>, BackendError> {
        let mut cmd = Command::new(&self.java);
        cmd.arg("-version").hide_window().kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(error)) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!("No java executable found at {}", self.java.display());
                return Ok(None);
            }
            Ok(Err(error)) => return Err(error.into()),
            Err(_) => {
                return Err(BackendError::Timeout {
                    operation: "java -version",
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
        report.push_str(&String::from_utf8_lossy(&output.stderr));
        trace!("java -version output: {report}");

        Ok((!report.trim().is_empty()).then_some(report))
    }
}
