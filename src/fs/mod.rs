//! Filesystem providers the walker reads through
//!
//! The walker needs exactly two operations: list the child names of a
//! directory and stat a path without following symlinks. `OsFs` forwards to
//! `std::fs`; `MemoryFs` serves an in-memory tree.

mod memory;

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::entry::EntryMetadata;

pub use memory::MemoryFs;

/// Minimal read-only filesystem abstraction.
///
/// Implementations must report a missing path as `io::ErrorKind::NotFound`
/// and a non-directory passed to `read_dir` as
/// `io::ErrorKind::NotADirectory`, the way the OS does.
pub trait FileSystem: Send + Sync {
    /// Names of the direct children of `path`, in the provider's own order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Metadata of `path` itself; symlinks are not followed.
    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata>;
}

/// The real OS filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        fs::symlink_metadata(path).map(EntryMetadata::from)
    }
}
