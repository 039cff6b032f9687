//! dirsnap - Synchronous recursive directory listing
//!
//! Walks a directory tree depth-first and returns every entry beneath the
//! root together with its (non-link-following) metadata, in pre-order.
//! Depth limits, ignore globs, a caller-supplied filter and file/directory
//! only modes shape the result; the filesystem itself is pluggable.
//!
//! ```no_run
//! use dirsnap::{WalkerConfig, walk};
//!
//! let config = WalkerConfig::default()
//!     .depth_limit(Some(2))
//!     .ignore_patterns(["target", ".git"])
//!     .filter(|e| !e.file_name().starts_with('.'));
//!
//! for entry in walk(".", &config)? {
//!     println!("{}", entry.path.display());
//! }
//! # Ok::<(), dirsnap::WalkError>(())
//! ```

pub mod entry;
pub mod error;
pub mod fs;
pub mod output;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use entry::{Entry, EntryMetadata, FileKind};
pub use error::{Result, WalkError};
pub use fs::{FileSystem, MemoryFs, OsFs};
pub use output::{ListFormatter, OutputConfig, print_json};
pub use walk::{Filter, PatternSet, Walk, Walker, WalkerConfig, walk, walk_iter};
