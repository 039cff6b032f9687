//! Recursive directory walking
//!
//! - `config` - `WalkerConfig` and the `Filter` predicate type
//! - `pattern` - Ignore-pattern matching
//! - `walker` - The depth-first pre-order walk itself

mod config;
mod pattern;
mod walker;

pub use config::{Filter, WalkerConfig};
pub use pattern::{PatternSet, matches};
pub use walker::{Walk, Walker, resolve_root, walk, walk_iter};
