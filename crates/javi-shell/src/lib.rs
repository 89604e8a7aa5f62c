#![allow(clippy::missing_errors_doc)]

mod config;
mod detect;
mod dispatch;
mod verify;

pub use config::{ConfigError, ShellConfig, ShellConfigEdit};
pub use detect::{ShellType, detect_shell};
pub use dispatch::{BackendDispatcher, DispatchHandle, ShellDispatcher, use_command};
pub use verify::{
    VerificationResult, get_config_path_for_shell, get_or_create_config_path, verify_shell_config,
};
