//! JSON output formatting

use std::io;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entry::Entry;

use super::utils::display_path;

/// Serializable view of an `Entry`.
#[derive(Debug, Serialize)]
pub struct JsonEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub size: u64,
    /// Permission bits as an octal string, e.g. `"0644"`.
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlink: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl JsonEntry {
    pub fn new(entry: &Entry, relative_to: Option<&Path>) -> Self {
        let meta = &entry.metadata;
        Self {
            path: display_path(&entry.path, relative_to),
            kind: meta.kind.as_str(),
            size: meta.len,
            mode: format!("{:04o}", meta.mode),
            nlink: meta.nlink,
            modified: meta.modified.map(utc),
            accessed: meta.accessed.map(utc),
            created: meta.created.map(utc),
        }
    }
}

fn utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// Render entries as a pretty-printed JSON array.
pub fn to_json(entries: &[Entry], relative_to: Option<&Path>) -> serde_json::Result<String> {
    let items: Vec<JsonEntry> = entries
        .iter()
        .map(|e| JsonEntry::new(e, relative_to))
        .collect();
    serde_json::to_string_pretty(&items)
}

/// Print entries as pretty-printed JSON to stdout.
pub fn print_json(entries: &[Entry], relative_to: Option<&Path>) -> io::Result<()> {
    let json = to_json(entries, relative_to).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryMetadata, FileKind};
    use std::path::PathBuf;
    use std::time::Duration;

    fn entry(path: &str, kind: FileKind) -> Entry {
        Entry::new(
            PathBuf::from(path),
            EntryMetadata {
                kind,
                len: 12,
                mode: 0o640,
                modified: Some(SystemTime::UNIX_EPOCH + Duration::from_secs(86_400)),
                accessed: None,
                created: None,
                nlink: Some(1),
            },
        )
    }

    #[test]
    fn test_json_fields() {
        let entries = vec![entry("/r/a.txt", FileKind::File)];
        let json = to_json(&entries, Some(Path::new("/r"))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let item = &value[0];
        assert_eq!(item["path"], "a.txt");
        assert_eq!(item["type"], "file");
        assert_eq!(item["size"], 12);
        assert_eq!(item["mode"], "0640");
        assert_eq!(item["modified"], "1970-01-02T00:00:00Z");
        assert!(item.get("accessed").is_none());
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(to_json(&[], None).unwrap(), "[]");
    }
}
