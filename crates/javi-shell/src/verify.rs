use crate::config::ShellConfig;
use crate::detect::ShellType;
use std::path::PathBuf;
use tokio::process::Command;
use javi_platform::HideWindow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Configured(PathBuf),
    NotConfigured,
    ConfigFileNotFound,
    FunctionalButNotInConfig,
    Error(String),
}

pub async fn verify_shell_config(
    shell_type: ShellType,
    marker: &str,
    backend_binary: &str,
) -> VerificationResult {
    let Some(config_path) = get_config_path_for_shell(shell_type) else {
        return VerificationResult::ConfigFileNotFound;
    };

    match ShellConfig::load(shell_type, config_path.clone()) {
        Ok(config) => {
            if config.has_init(marker) {
                VerificationResult::Configured(config_path)
            } else if functional_test(shell_type, backend_binary).await {
                VerificationResult::FunctionalButNotInConfig
            } else {
                VerificationResult::NotConfigured
            }
        }
        Err(e) => VerificationResult::Error(e.to_string()),
    }
}

async fn functional_test(shell_type: ShellType, backend_binary: &str) -> bool {
    let version_cmd = format!("{backend_binary} --version");
    let (program, args): (&str, Vec<&str>) = match shell_type {
        ShellType::Bash => ("bash", vec!["-i", "-c", &version_cmd]),
        ShellType::Zsh => ("zsh", vec!["-i", "-c", &version_cmd]),
        ShellType::Fish => ("fish", vec!["-c", &version_cmd]),
        ShellType::PowerShell => {
            let shell = if which::which("pwsh").is_ok() {
                "pwsh"
            } else {
                "powershell"
            };
            (shell, vec!["-Command", &version_cmd])
        }
    };

    Command::new(program)
        .args(&args)
        .hide_window()
        .kill_on_drop(true)
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[must_use]
pub fn get_config_path_for_shell(shell_type: ShellType) -> Option<PathBuf> {
    shell_type.config_files().into_iter().find(|p| p.exists())
}

#[must_use]
pub fn get_or_create_config_path(shell_type: ShellType) -> Option<PathBuf> {
    if let Some(existing) = get_config_path_for_shell(shell_type) {
        return Some(existing);
    }

    shell_type.config_files().into_iter().next()
}
