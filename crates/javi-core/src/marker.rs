use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use thiserror::Error;

use javi_backend::MARKER_FILE_NAME;

#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Single-value store for a project's declared local version.
#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// The trimmed value, or `None` when absent or blank.
    async fn read(&self) -> Result<Option<String>, MarkerError>;

    /// Replaces the stored value.
    async fn write(&self, version: &str) -> Result<(), MarkerError>;
}

/// `.jabbarc` in a project root.
#[derive(Debug, Clone)]
pub struct FileMarkerStore {
    path: PathBuf,
}

impl FileMarkerStore {
    #[must_use]
    pub fn in_dir(root: &Path) -> Self {
        Self {
            path: root.join(MARKER_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MarkerStore for FileMarkerStore {
    async fn read(&self) -> Result<Option<String>, MarkerError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let value = content.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(MarkerError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write(&self, version: &str) -> Result<(), MarkerError> {
        tokio::fs::write(&self.path, version.trim())
            .await
            .map_err(|source| MarkerError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!("Wrote {} to {}", version.trim(), self.path.display());
        Ok(())
    }
}
