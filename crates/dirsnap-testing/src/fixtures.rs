//! Entry and leaf builders with deterministic timestamps.

use chrono::{DateTime, TimeZone, Utc};
use dirsnap_types::{Entry, EntryKind, LeafDir, parent_path};

/// Fixed modification time used by every fixture: 2024-03-01T12:00:00Z.
pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn entry(path: &str, kind: EntryKind) -> Entry {
    let parent = parent_path(path);
    let name = path.rsplit('/').next().unwrap_or(path);
    Entry::new(parent, name, kind, timestamp())
}

/// A directory entry at `path`.
pub fn dir_entry(path: &str) -> Entry {
    entry(path, EntryKind::Directory)
}

/// A regular file entry at `path`.
pub fn file_entry(path: &str) -> Entry {
    entry(path, EntryKind::File)
}

/// A leaf row for `path` with the fixture timestamp.
pub fn leaf(path: &str) -> LeafDir {
    LeafDir::from(&dir_entry(path))
}

/// Leaf rows for several paths, in order.
pub fn leaves(paths: &[&str]) -> Vec<LeafDir> {
    paths.iter().map(|p| leaf(p)).collect()
}
