use javi_backend::BackendError;

const MISSING_TOOL_HINT: &str = "Is jabba installed and on your PATH? Install it from https://github.com/shyiko/jabba, run `javi setup-shell`, then open a new terminal.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppErrorDetail {
    Message(String),
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
    Backend(BackendError),
}

impl std::fmt::Display for AppErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::Io { kind, message } => write!(f, "{kind}: {message}"),
            Self::Backend(error) if error.is_tool_missing() => {
                write!(f, "{error}\n\n{MISSING_TOOL_HINT}")
            }
            Self::Backend(error) => write!(f, "{error}"),
        }
    }
}

impl From<String> for AppErrorDetail {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for AppErrorDetail {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<std::io::Error> for AppErrorDetail {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl From<BackendError> for AppErrorDetail {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

impl From<javi_core::MarkerError> for AppErrorDetail {
    fn from(value: javi_core::MarkerError) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<javi_shell::ConfigError> for AppErrorDetail {
    fn from(value: javi_shell::ConfigError) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<javi_platform::AppPathsError> for AppErrorDetail {
    fn from(value: javi_platform::AppPathsError) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<serde_json::Error> for AppErrorDetail {
    fn from(value: serde_json::Error) -> Self {
        Self::Message(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Message(String),
    Timeout {
        operation: &'static str,
        seconds: u64,
    },
    ToolUnavailable,
    NoMarker {
        reason: &'static str,
    },
    ShellConfigPathNotFound {
        shell: &'static str,
    },
    ShellConfigFailed {
        shell: &'static str,
        action: &'static str,
        details: AppErrorDetail,
    },
    OperationFailed {
        operation: &'static str,
        details: AppErrorDetail,
    },
    WatchAlreadyRunning,
    EnvironmentUnavailable {
        reason: AppErrorDetail,
    },
}

impl AppError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn timeout(operation: &'static str, seconds: u64) -> Self {
        Self::Timeout { operation, seconds }
    }

    pub fn no_marker(reason: &'static str) -> Self {
        Self::NoMarker { reason }
    }

    pub fn shell_config_path_not_found(shell: &'static str) -> Self {
        Self::ShellConfigPathNotFound { shell }
    }

    pub fn shell_config_failed(
        shell: &'static str,
        action: &'static str,
        details: impl Into<AppErrorDetail>,
    ) -> Self {
        Self::ShellConfigFailed {
            shell,
            action,
            details: details.into(),
        }
    }

    pub fn operation_failed(operation: &'static str, details: impl Into<AppErrorDetail>) -> Self {
        Self::OperationFailed {
            operation,
            details: details.into(),
        }
    }

    pub fn environment_unavailable(reason: impl Into<AppErrorDetail>) -> Self {
        Self::EnvironmentUnavailable {
            reason: reason.into(),
        }
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for AppError {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::Timeout { operation, seconds } => {
                write!(f, "{operation} timed out after {seconds}s")
            }
            Self::ToolUnavailable => write!(f, "jabba was not found.\n\n{MISSING_TOOL_HINT}"),
            Self::NoMarker { reason } => {
                write!(f, "{reason}. Set a local version first with `javi local <version>`.")
            }
            Self::ShellConfigPathNotFound { shell } => {
                write!(f, "No shell config file path found for {shell}")
            }
            Self::ShellConfigFailed {
                shell,
                action,
                details,
            } => write!(f, "{shell} shell {action} failed: {details}"),
            Self::OperationFailed { operation, details } => {
                write!(f, "{operation} failed: {details}")
            }
            Self::WatchAlreadyRunning => {
                write!(f, "Another javi watcher is already running")
            }
            Self::EnvironmentUnavailable { reason } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for AppError {}
