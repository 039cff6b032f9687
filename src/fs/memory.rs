//! In-memory filesystem provider

use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use super::FileSystem;
use crate::entry::{EntryMetadata, FileKind};

/// Symlink hops followed while resolving a path before giving up.
const MAX_LINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
enum Node {
    Dir { children: Vec<OsString> },
    File { contents: Vec<u8> },
    Symlink { target: PathBuf },
}

#[derive(Debug, Clone)]
struct Inode {
    node: Node,
    created: SystemTime,
}

/// A virtual filesystem held entirely in memory.
///
/// Paths are absolute. Directory listings come back in insertion order.
/// Each node's timestamps are fixed when it is created, so repeated walks
/// over an unmodified tree see identical metadata.
///
/// ```
/// use dirsnap::{MemoryFs, WalkerConfig, walk};
///
/// let mut fs = MemoryFs::new();
/// fs.write_file("/project/src/main.rs", "fn main() {}");
/// fs.mkdir_p("/project/docs");
///
/// let config = WalkerConfig::default().fs(fs);
/// let entries = walk("/project", &config).unwrap();
/// assert_eq!(entries.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFs {
    nodes: HashMap<PathBuf, Inode>,
    denied: HashSet<PathBuf>,
}

impl MemoryFs {
    /// Create a filesystem holding only the root directory `/`.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            PathBuf::from("/"),
            Inode {
                node: Node::Dir {
                    children: Vec::new(),
                },
                created: SystemTime::now(),
            },
        );
        Self {
            nodes,
            denied: HashSet::new(),
        }
    }

    /// Create a directory and any missing parents.
    ///
    /// # Panics
    ///
    /// Panics if `path` is relative or an ancestor is not a directory.
    pub fn mkdir_p(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.is_absolute(), "MemoryFs paths must be absolute");

        let mut current = PathBuf::from("/");
        for component in path.components().skip(1) {
            let name = component.as_os_str().to_os_string();
            let next = current.join(&name);
            match self.nodes.get(&next).map(|i| &i.node) {
                Some(Node::Dir { .. }) => {}
                Some(_) => panic!("{} exists and is not a directory", next.display()),
                None => self.insert(
                    &current,
                    name,
                    Node::Dir {
                        children: Vec::new(),
                    },
                ),
            }
            current = next;
        }
    }

    /// Write a file, creating parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if `path` is an existing directory.
    pub fn write_file(&mut self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let (parent, name) = split(path);
        self.mkdir_p(parent);
        self.insert(
            parent,
            name,
            Node::File {
                contents: contents.as_ref().to_vec(),
            },
        );
    }

    /// Create a symlink at `link` pointing to `target`.
    pub fn symlink(&mut self, target: impl AsRef<Path>, link: impl AsRef<Path>) {
        let link = link.as_ref();
        let (parent, name) = split(link);
        self.mkdir_p(parent);
        self.insert(
            parent,
            name,
            Node::Symlink {
                target: target.as_ref().to_path_buf(),
            },
        );
    }

    /// Make listing `path` fail with `PermissionDenied`.
    pub fn deny(&mut self, path: impl AsRef<Path>) {
        self.denied.insert(path.as_ref().to_path_buf());
    }

    fn insert(&mut self, parent: &Path, name: OsString, node: Node) {
        let path = parent.join(&name);
        if let Some(Inode {
            node: Node::Dir { .. },
            ..
        }) = self.nodes.get(&path)
        {
            panic!("{} is a directory", path.display());
        }
        let fresh = self
            .nodes
            .insert(
                path,
                Inode {
                    node,
                    created: SystemTime::now(),
                },
            )
            .is_none();
        if !fresh {
            return;
        }
        if let Some(Inode {
            node: Node::Dir { children },
            ..
        }) = self.nodes.get_mut(parent)
        {
            children.push(name);
        }
    }

    /// Resolve symlinks in every component of `path` (and in the last one
    /// too when `follow_last` is set), dropping `.` and `..` lexically.
    fn resolve(&self, path: &Path, follow_last: bool) -> io::Result<PathBuf> {
        let mut resolved = PathBuf::from("/");
        let mut rest: VecDeque<OsString> = names(path).collect();
        let mut hops = 0;

        while let Some(name) = rest.pop_front() {
            if name == ".." {
                resolved.pop();
                continue;
            }
            let next = resolved.join(&name);
            let last = rest.is_empty();
            match self.nodes.get(&next).map(|i| &i.node) {
                Some(Node::Symlink { target }) if follow_last || !last => {
                    hops += 1;
                    if hops > MAX_LINK_HOPS {
                        return Err(io::Error::other(format!(
                            "too many levels of symbolic links: {}",
                            path.display()
                        )));
                    }
                    if target.is_absolute() {
                        resolved = PathBuf::from("/");
                    }
                    for name in names(target).rev() {
                        rest.push_front(name);
                    }
                }
                Some(Node::File { .. }) if !last => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        next.display().to_string(),
                    ));
                }
                _ => resolved = next,
            }
        }
        Ok(resolved)
    }

    fn lookup(&self, path: &Path) -> io::Result<&Inode> {
        self.nodes
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let resolved = self.resolve(path, true)?;
        if self.denied.contains(&resolved) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                resolved.display().to_string(),
            ));
        }
        match &self.lookup(&resolved)?.node {
            Node::Dir { children } => Ok(children.clone()),
            _ => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                resolved.display().to_string(),
            )),
        }
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let inode = self.lookup(&self.resolve(path, false)?)?;
        let (kind, len, mode, nlink) = match &inode.node {
            Node::Dir { .. } => (FileKind::Dir, 0, 0o755, 2),
            Node::File { contents } => (FileKind::File, contents.len() as u64, 0o644, 1),
            Node::Symlink { target } => (
                FileKind::Symlink,
                target.as_os_str().len() as u64,
                0o777,
                1,
            ),
        };
        Ok(EntryMetadata {
            kind,
            len,
            mode,
            modified: Some(inode.created),
            accessed: Some(inode.created),
            created: Some(inode.created),
            nlink: Some(nlink),
        })
    }
}

/// Path components as names, with `..` kept and `/` and `.` dropped.
fn names(path: &Path) -> impl DoubleEndedIterator<Item = OsString> + '_ {
    path.components().filter_map(|c| match c {
        Component::Normal(name) => Some(name.to_os_string()),
        Component::ParentDir => Some(OsString::from("..")),
        Component::RootDir | Component::CurDir | Component::Prefix(_) => None,
    })
}

fn split(path: &Path) -> (&Path, OsString) {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => (parent, name.to_os_string()),
        _ => panic!("{} has no file name", path.display()),
    }
}
