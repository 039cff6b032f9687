//! Output configuration types

use std::path::PathBuf;

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Show kind, permissions, link count, size and mtime before each path.
    pub long: bool,
    /// Print paths relative to this directory when they live beneath it.
    pub relative_to: Option<PathBuf>,
}
