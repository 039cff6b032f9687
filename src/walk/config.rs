//! Configuration types for the walker

use std::fmt;
use std::sync::Arc;

use crate::entry::Entry;
use crate::error::{Result, WalkError};
use crate::fs::{FileSystem, OsFs};

/// Predicate deciding whether an entry appears in the output.
pub type Filter = Arc<dyn Fn(&Entry) -> bool + Send + Sync>;

/// Options for one walk. Built once, then borrowed read-only.
#[derive(Clone)]
pub struct WalkerConfig {
    /// Emit directory entries.
    pub include_directories: bool,
    /// Emit non-directory entries (files, symlinks, others).
    pub include_files: bool,
    /// Deepest level recursed into; the root's children are level 0.
    /// `None` means unlimited.
    pub depth_limit: Option<usize>,
    /// Glob patterns pruning entries from output and recursion.
    pub ignore_patterns: Vec<String>,
    pub filter: Option<Filter>,
    /// Skip the subtree of a directory rejected by `filter`. With
    /// `include_directories` off, every directory counts as rejected.
    pub no_recurse_on_failed_filter: bool,
    pub fs: Arc<dyn FileSystem>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            include_directories: true,
            include_files: true,
            depth_limit: None,
            ignore_patterns: Vec::new(),
            filter: None,
            no_recurse_on_failed_filter: false,
            fs: Arc::new(OsFs),
        }
    }
}

impl fmt::Debug for WalkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkerConfig")
            .field("include_directories", &self.include_directories)
            .field("include_files", &self.include_files)
            .field("depth_limit", &self.depth_limit)
            .field("ignore_patterns", &self.ignore_patterns)
            .field("filter", &self.filter.as_ref().map(|_| "..."))
            .field(
                "no_recurse_on_failed_filter",
                &self.no_recurse_on_failed_filter,
            )
            .finish_non_exhaustive()
    }
}

impl WalkerConfig {
    pub fn include_directories(mut self, yes: bool) -> Self {
        self.include_directories = yes;
        self
    }

    pub fn include_files(mut self, yes: bool) -> Self {
        self.include_files = yes;
        self
    }

    pub fn depth_limit(mut self, limit: Option<usize>) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Set the depth limit from its signed form, where `-1` means unlimited.
    pub fn with_depth_sentinel(self, limit: i64) -> Result<Self> {
        let limit = match limit {
            -1 => None,
            n if n >= 0 => Some(usize::try_from(n).map_err(|_| {
                WalkError::InvalidConfig(format!("depth limit {n} is too large"))
            })?),
            n => {
                return Err(WalkError::InvalidConfig(format!(
                    "depth limit must be -1 or non-negative, got {n}"
                )));
            }
        };
        Ok(self.depth_limit(limit))
    }

    pub fn ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Entry) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn no_recurse_on_failed_filter(mut self, yes: bool) -> Self {
        self.no_recurse_on_failed_filter = yes;
        self
    }

    pub fn fs<F: FileSystem + 'static>(mut self, fs: F) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Whether a directory at `depth` may be descended into.
    pub(crate) fn may_descend(&self, depth: usize) -> bool {
        self.depth_limit.is_none_or(|max| depth < max)
    }

    /// Whether a directory with filter outcome `passed` is descended into.
    /// With a filter, only a directory that is both accepted and emitted
    /// counts as passing; anything else is pruned under
    /// `no_recurse_on_failed_filter`.
    pub(crate) fn recurses_into(&self, passed: bool) -> bool {
        self.filter.is_none()
            || (passed && self.include_directories)
            || !self.no_recurse_on_failed_filter
    }

    /// Run the filter, treating a missing filter as "keep".
    pub(crate) fn passes(&self, entry: &Entry) -> bool {
        self.filter.as_ref().is_none_or(|f| f(entry))
    }
}
