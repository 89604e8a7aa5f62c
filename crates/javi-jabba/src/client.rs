use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, error, info, trace};
use tokio::process::Command;

use javi_backend::{BackendError, RawVersion};
use javi_platform::HideWindow;

use crate::version::{clean_output, parse_current, parse_version_list};

#[derive(Debug, Clone)]
pub enum JabbaEnvironment {
    /// jabba is a shell function sourced from `$JABBA_HOME/jabba.sh`.
    Unix { jabba_home: PathBuf },
    Windows { jabba_exe: PathBuf },
}

/// Upper bounds for external commands, by kind.
#[derive(Debug, Clone, Copy)]
pub struct CommandTimeouts {
    pub install: Duration,
    pub operation: Duration,
    pub fetch: Duration,
}

impl Default for CommandTimeouts {
    fn default() -> Self {
        Self {
            install: Duration::from_secs(600),
            operation: Duration::from_secs(60),
            fetch: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JabbaClient {
    pub environment: JabbaEnvironment,
    pub timeouts: CommandTimeouts,
}

impl JabbaClient {
    #[must_use]
    pub fn unix(jabba_home: PathBuf) -> Self {
        Self {
            environment: JabbaEnvironment::Unix { jabba_home },
            timeouts: CommandTimeouts::default(),
        }
    }

    #[must_use]
    pub fn windows(jabba_exe: PathBuf) -> Self {
        Self {
            environment: JabbaEnvironment::Windows { jabba_exe },
            timeouts: CommandTimeouts::default(),
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: CommandTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn is_windows(&self) -> bool {
        matches!(self.environment, JabbaEnvironment::Windows { .. })
    }

    fn build_command(&self, args: &[&str], cwd: Option<&Path>) -> Command {
        let mut cmd = match &self.environment {
            JabbaEnvironment::Unix { jabba_home } => {
                let script = format!(
                    "export JABBA_HOME=\"{}\"; [ -s \"$JABBA_HOME/jabba.sh\" ] && \\. \"$JABBA_HOME/jabba.sh\"; jabba \"$@\"",
                    jabba_home.display(),
                );
                let mut cmd = Command::new("bash");
                cmd.args(["-c", &script, "bash"]);
                cmd.args(args);
                cmd
            }
            JabbaEnvironment::Windows { jabba_exe } => {
                let mut cmd = Command::new(jabba_exe);
                cmd.args(args);
                cmd
            }
        };

        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        cmd.plain_output();
        cmd.hide_window();
        cmd.kill_on_drop(true);
        cmd
    }

    async fn execute_in(
        &self,
        operation: &'static str,
        args: &[&str],
        cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<String, BackendError> {
        info!("Executing jabba command: {}", args.join(" "));

        let output = tokio::time::timeout(timeout, self.build_command(args, cwd).output())
            .await
            .map_err(|_| BackendError::Timeout {
                operation,
                seconds: timeout.as_secs(),
            })??;

        debug!("jabba command exit status: {:?}", output.status);
        trace!("jabba stdout: {}", String::from_utf8_lossy(&output.stdout));

        if output.status.success() {
            Ok(clean_output(&String::from_utf8_lossy(&output.stdout)))
        } else {
            let stderr = clean_output(&String::from_utf8_lossy(&output.stderr));
            error!("jabba command failed: args={args:?}, stderr='{}'", stderr.trim());
            Err(BackendError::command_failed(stderr.trim()))
        }
    }

    async fn execute(
        &self,
        operation: &'static str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<String, BackendError> {
        self.execute_in(operation, args, None, timeout).await
    }

    /// List installed JDKs.
    ///
    /// # Errors
    /// Returns an error if invoking `jabba ls` fails.
    pub async fn list_installed(&self) -> Result<Vec<RawVersion>, BackendError> {
        let output = self.execute("ls", &["ls"], self.timeouts.fetch).await?;
        Ok(parse_version_list(&output))
    }

    /// List JDKs available for installation, optionally narrowed by a
    /// jabba-side filter such as `openjdk@17`.
    ///
    /// # Errors
    /// Returns an error if invoking `jabba ls-remote` fails.
    pub async fn list_remote(&self, filter: Option<&str>) -> Result<Vec<RawVersion>, BackendError> {
        let mut args = vec!["ls-remote"];
        args.extend(filter);
        let output = self.execute("ls-remote", &args, self.timeouts.fetch).await?;
        Ok(parse_version_list(&output))
    }

    /// Return the version jabba currently has active.
    ///
    /// # Errors
    /// Returns an error if `jabba current` fails.
    pub async fn current(&self) -> Result<Option<RawVersion>, BackendError> {
        let output = self
            .execute("current", &["current"], self.timeouts.operation)
            .await?;
        Ok(parse_current(&output))
    }

    /// # Errors
    /// Returns an error if the install command fails or times out.
    pub async fn install(&self, version: &RawVersion) -> Result<(), BackendError> {
        self.execute("install", &["install", version.as_str()], self.timeouts.install)
            .await?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the uninstall command fails.
    pub async fn uninstall(&self, version: &RawVersion) -> Result<(), BackendError> {
        self.execute(
            "uninstall",
            &["uninstall", version.as_str()],
            self.timeouts.operation,
        )
        .await?;
        Ok(())
    }

    /// Point the `default` alias at `version`.
    ///
    /// # Errors
    /// Returns an error if `jabba alias default` fails.
    pub async fn set_default(&self, version: &RawVersion) -> Result<(), BackendError> {
        self.execute(
            "alias default",
            &["alias", "default", version.as_str()],
            self.timeouts.operation,
        )
        .await?;
        Ok(())
    }

    /// Activate `version`, optionally from inside a project directory.
    ///
    /// # Errors
    /// Returns an error if `jabba use` fails.
    pub async fn use_version(
        &self,
        version: &RawVersion,
        cwd: Option<&Path>,
    ) -> Result<(), BackendError> {
        self.execute_in(
            "use",
            &["use", version.as_str()],
            cwd,
            self.timeouts.operation,
        )
        .await?;
        Ok(())
    }

    /// Return the installed jabba tool version string.
    ///
    /// # Errors
    /// Returns an error if querying `jabba --version` fails.
    pub async fn version(&self) -> Result<String, BackendError> {
        let output = self
            .execute("--version", &["--version"], self.timeouts.operation)
            .await?;
        Ok(output.trim().to_string())
    }
}
