//! Ignore-pattern matching
//!
//! Patterns use gitignore glob syntax: `*`, `?`, `**`, character classes,
//! `{a,b}` alternation and `!` negation. A pattern without a `/` matches an
//! entry's name at any depth, a pattern containing `/` is anchored at the
//! walk root. When patterns conflict the last one that matches wins.

use std::path::Path;

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{Result, WalkError};

/// A compiled set of ignore patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    matcher: Gitignore,
    len: usize,
}

impl PatternSet {
    /// Compile `patterns`. Empty lines and `#` comments are skipped.
    ///
    /// A trailing `/` is dropped: the ignore stage runs on names before any
    /// stat, so it cannot restrict a pattern to directories.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new("");
        let mut len = 0;
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let line = normalize(pattern);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, line)
                .map_err(|source| WalkError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            len += 1;
        }
        let matcher = builder.build().map_err(|source| WalkError::Pattern {
            pattern: String::new(),
            source,
        })?;
        Ok(Self { matcher, len })
    }

    /// An empty set that matches nothing.
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            len: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Check a root-relative path (or a bare name) against the set.
    pub fn matches(&self, candidate: impl AsRef<Path>) -> bool {
        if self.is_empty() {
            return false;
        }
        matches!(
            self.matcher.matched(candidate.as_ref(), false),
            Match::Ignore(_)
        )
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// One-shot check of `candidate` against `patterns`.
pub fn matches<S: AsRef<str>>(candidate: impl AsRef<Path>, patterns: &[S]) -> Result<bool> {
    Ok(PatternSet::new(patterns)?.matches(candidate))
}

fn normalize(pattern: &str) -> &str {
    let trimmed = pattern.trim();
    match trimmed.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => trimmed,
    }
}
