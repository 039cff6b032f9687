//! Shared utility functions for output formatting

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::entry::{EntryMetadata, FileKind};

/// Path as shown to the user, relative to `base` when it lies beneath it.
pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    base.and_then(|b| path.strip_prefix(b).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// `ls -l` style type and permission string, e.g. `drwxr-xr-x`.
pub fn format_mode(meta: &EntryMetadata) -> String {
    let kind = match meta.kind {
        FileKind::Dir => 'd',
        FileKind::Symlink => 'l',
        FileKind::File => '-',
        FileKind::Other => '?',
    };
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (meta.mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

/// Local modification time as `YYYY-MM-DD HH:MM`, or dashes when unknown.
pub fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string(),
        None => "----------------".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(kind: FileKind, mode: u32) -> EntryMetadata {
        EntryMetadata {
            kind,
            len: 0,
            mode,
            modified: None,
            accessed: None,
            created: None,
            nlink: None,
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.0K");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0M");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0G");
    }

    #[test]
    fn test_format_mode() {
        assert_eq!(format_mode(&meta(FileKind::Dir, 0o755)), "drwxr-xr-x");
        assert_eq!(format_mode(&meta(FileKind::File, 0o640)), "-rw-r-----");
        assert_eq!(format_mode(&meta(FileKind::Symlink, 0o777)), "lrwxrwxrwx");
    }

    #[test]
    fn test_display_path() {
        let path = Path::new("/root/a/b.txt");
        assert_eq!(display_path(path, Some(Path::new("/root"))), "a/b.txt");
        assert_eq!(display_path(path, Some(Path::new("/other"))), "/root/a/b.txt");
        assert_eq!(display_path(path, None), "/root/a/b.txt");
    }

    #[test]
    fn test_format_time_unknown() {
        assert_eq!(format_time(None).len(), "2024-01-01 00:00".len());
    }
}
