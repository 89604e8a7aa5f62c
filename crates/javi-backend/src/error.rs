use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("jabba not found")]
    NotFound,

    #[error("Command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("Version not found: {version}")]
    VersionNotFound { version: String },

    #[error("IO error ({kind}): {message}")]
    IoError {
        kind: std::io::ErrorKind,
        message: String,
    },

    #[error("Operation not supported by this backend: {operation}")]
    Unsupported { operation: &'static str },

    #[error("Backend-specific error in {context}: {details}")]
    BackendSpecific {
        context: &'static str,
        details: String,
    },

    #[error("Timeout waiting for {operation} after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },
}

impl BackendError {
    pub fn command_failed(stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            stderr: stderr.into(),
        }
    }

    pub fn backend_specific(context: &'static str, details: impl Into<String>) -> Self {
        Self::BackendSpecific {
            context,
            details: details.into(),
        }
    }

    /// True when the failure looks like the tool itself is missing rather
    /// than the requested operation failing.
    #[must_use]
    pub fn is_tool_missing(&self) -> bool {
        match self {
            Self::NotFound => true,
            Self::IoError { kind, .. } => *kind == std::io::ErrorKind::NotFound,
            Self::CommandFailed { stderr } => {
                stderr.contains("command not found") || stderr.contains("not recognized")
            }
            _ => false,
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
