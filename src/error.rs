//! Error types for directory walking

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while setting up or running a walk.
///
/// Every variant is fatal: a walk that hits one stops and returns no
/// partial result.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The root path does not exist.
    #[error("no such directory: {}", path.display())]
    NotFound { path: PathBuf },

    /// The root path exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Listing or stat-ing an entry failed during the walk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An ignore pattern could not be compiled.
    #[error("invalid ignore pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    /// A configuration value was out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WalkError {
    /// True when the error is about the root itself rather than something
    /// found beneath it.
    pub fn is_root_error(&self) -> bool {
        matches!(
            self,
            WalkError::NotFound { .. } | WalkError::NotADirectory { .. }
        )
    }

    /// Map an I/O error on the root to the matching root variant.
    pub(crate) fn from_root(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => WalkError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::NotADirectory => WalkError::NotADirectory {
                path: path.to_path_buf(),
            },
            _ => WalkError::io(path, err),
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        WalkError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WalkError>;
