//! Depth-first pre-order walk
//!
//! `Walk` keeps an explicit stack of open directories, so entries are
//! produced one at a time as they are discovered. A directory is yielded
//! before anything beneath it, and its whole subtree is yielded before its
//! next sibling. Siblings come in the order the provider lists them.

use std::ffi::OsString;
use std::iter::FusedIterator;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::{Result, WalkError};

use super::config::WalkerConfig;
use super::pattern::PatternSet;

/// Walk `root` and collect every entry that survives the configured options.
///
/// Fails with `NotFound` or `NotADirectory` when the root is unusable, and
/// with `Io` when anything beneath it cannot be listed or stat-ed. No
/// partial result is returned.
pub fn walk(root: impl AsRef<Path>, config: &WalkerConfig) -> Result<Vec<Entry>> {
    walk_iter(root, config)?.collect()
}

/// Lazy form of [`walk`]. Root problems are reported here; errors found
/// later are yielded once, after which the iterator ends.
pub fn walk_iter(root: impl AsRef<Path>, config: &WalkerConfig) -> Result<Walk<'_>> {
    Walk::new(root.as_ref(), config)
}

/// Owns a configuration and walks any number of roots with it.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkerConfig,
}

impl Walker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn walk(&self, root: impl AsRef<Path>) -> Result<Vec<Entry>> {
        walk(root, &self.config)
    }

    pub fn iter(&self, root: impl AsRef<Path>) -> Result<Walk<'_>> {
        walk_iter(root, &self.config)
    }
}

/// One open directory. `names` is filled on first visit.
struct Frame {
    dir: PathBuf,
    /// Depth of this directory's children.
    depth: usize,
    names: Option<std::vec::IntoIter<OsString>>,
}

/// Iterator over the entries beneath a root.
pub struct Walk<'a> {
    config: &'a WalkerConfig,
    root: PathBuf,
    ignore: PatternSet,
    stack: Vec<Frame>,
    emitted: usize,
    done: bool,
}

impl<'a> Walk<'a> {
    fn new(root: &Path, config: &'a WalkerConfig) -> Result<Self> {
        let ignore = PatternSet::new(&config.ignore_patterns)?;
        let root = resolve_root(root)?;
        debug!(
            root = %root.display(),
            depth_limit = ?config.depth_limit,
            ignore_patterns = ignore.len(),
            "starting walk"
        );

        let names = config
            .fs
            .read_dir(&root)
            .map_err(|err| WalkError::from_root(&root, err))?;

        Ok(Self {
            config,
            stack: vec![Frame {
                dir: root.clone(),
                depth: 0,
                names: Some(names.into_iter()),
            }],
            root,
            ignore,
            emitted: 0,
            done: false,
        })
    }

    /// The absolute root every yielded path starts with.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.ignore.matches(relative)
    }

    fn advance(&mut self) -> Option<Result<Entry>> {
        loop {
            let frame = self.stack.last_mut()?;
            if frame.names.is_none() {
                trace!(dir = %frame.dir.display(), "listing directory");
                match self.config.fs.read_dir(&frame.dir) {
                    Ok(names) => frame.names = Some(names.into_iter()),
                    Err(err) => return Some(Err(WalkError::io(&frame.dir, err))),
                }
            }
            let Some(name) = frame.names.as_mut().and_then(Iterator::next) else {
                self.stack.pop();
                continue;
            };
            let path = frame.dir.join(name);
            let depth = frame.depth;

            if self.is_ignored(&path) {
                debug!(path = %path.display(), "ignored by pattern");
                continue;
            }

            let metadata = match self.config.fs.symlink_metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) => return Some(Err(WalkError::io(&path, err))),
            };
            let entry = Entry::new(path, metadata);
            let passed = self.config.passes(&entry);

            if !entry.is_dir() {
                if passed && self.config.include_files {
                    return Some(Ok(entry));
                }
                continue;
            }

            if !self.config.recurses_into(passed) {
                debug!(path = %entry.path.display(), "filtered directory pruned");
            } else if self.config.may_descend(depth) {
                self.stack.push(Frame {
                    dir: entry.path.clone(),
                    depth: depth + 1,
                    names: None,
                });
            }

            if passed && self.config.include_directories {
                return Some(Ok(entry));
            }
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Some(Ok(entry)) => {
                self.emitted += 1;
                Some(Ok(entry))
            }
            Some(Err(err)) => {
                debug!(error = %err, "walk aborted");
                self.done = true;
                Some(Err(err))
            }
            None => {
                debug!(root = %self.root.display(), entries = self.emitted, "walk finished");
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for Walk<'_> {}

/// Make `root` absolute and drop `.`/`..` lexically, without touching the
/// filesystem. Symlinks in the path are kept as they are.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|err| WalkError::io(root, err))?
            .join(root)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Ok(resolved)
}
