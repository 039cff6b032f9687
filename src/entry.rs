//! Walk output: a path paired with the metadata of the entry itself

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// Type of a filesystem entry as reported by a non-link-following stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    File,
    Dir,
    Symlink,
    Other,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::File => "file",
            FileKind::Dir => "dir",
            FileKind::Symlink => "symlink",
            FileKind::Other => "other",
        }
    }
}

impl From<fs::FileType> for FileKind {
    fn from(ft: fs::FileType) -> Self {
        // Order matters: symlink_metadata never reports a link as a dir.
        if ft.is_symlink() {
            FileKind::Symlink
        } else if ft.is_dir() {
            FileKind::Dir
        } else if ft.is_file() {
            FileKind::File
        } else {
            FileKind::Other
        }
    }
}

/// Metadata of one entry.
///
/// Describes a symlink itself, never its target. Timestamps and the link
/// count are optional since not every platform or provider reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub kind: FileKind,
    pub len: u64,
    /// Permission bits (`st_mode & 0o7777` on Unix).
    pub mode: u32,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
    pub nlink: Option<u64>,
}

impl EntryMetadata {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Dir
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == FileKind::Symlink
    }
}

impl From<fs::Metadata> for EntryMetadata {
    fn from(meta: fs::Metadata) -> Self {
        let kind = FileKind::from(meta.file_type());
        Self {
            kind,
            len: meta.len(),
            mode: permission_bits(&meta, kind),
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
            created: meta.created().ok(),
            nlink: link_count(&meta),
        }
    }
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata, _kind: FileKind) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata, kind: FileKind) -> u32 {
    match (kind, meta.permissions().readonly()) {
        (FileKind::Dir, true) => 0o555,
        (FileKind::Dir, false) => 0o755,
        (_, true) => 0o444,
        (_, false) => 0o644,
    }
}

#[cfg(unix)]
fn link_count(meta: &fs::Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(meta.nlink())
}

#[cfg(not(unix))]
fn link_count(_meta: &fs::Metadata) -> Option<u64> {
    None
}

/// One item of walk output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path, built from the resolved root.
    pub path: PathBuf,
    pub metadata: EntryMetadata,
}

impl Entry {
    pub fn new(path: PathBuf, metadata: EntryMetadata) -> Self {
        Self { path, metadata }
    }

    /// Final path component, lossily converted.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> FileKind {
        self.metadata.kind
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    pub fn len(&self) -> u64 {
        self.metadata.len
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.len == 0
    }
}
