//! Error types for launcher I/O outside the reconciliation pass

use std::path::PathBuf;

/// Result type for launcher operations
pub type Result<T> = std::result::Result<T, LauncherError>;

/// Errors that can occur while reading or writing launcher files
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl LauncherError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
