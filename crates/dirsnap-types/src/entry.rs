use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::join_path;

/// Kind of a remote entry as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
    /// Symlinks, devices and anything else the server reports.
    Other,
}

/// A single entry returned by one directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Last path segment.
    pub name: String,
    /// Full slash-separated path, starting from the server root.
    pub path: String,
    pub kind: EntryKind,
    /// Server-reported modification time. Often minute or day precision.
    pub modified_at: DateTime<Utc>,
}

impl Entry {
    /// Build an entry located directly under `parent`.
    pub fn new(
        parent: &str,
        name: impl Into<String>,
        kind: EntryKind,
        modified_at: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let path = join_path(parent, &name);
        Self {
            name,
            path,
            kind,
            modified_at,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// True for the `.` and `..` markers some servers include in listings.
    pub fn is_current_or_parent(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// A directory with no child directory in the walk that produced it.
///
/// This is the unit persisted per site: one row per leaf directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafDir {
    pub name: String,
    pub path: String,
    /// Unix epoch seconds.
    pub modified_at: i64,
}

impl From<&Entry> for LeafDir {
    fn from(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            path: entry.path.clone(),
            modified_at: entry.modified_at.timestamp(),
        }
    }
}
