//! In-memory stand-in for a remote FTP session.

use std::collections::{BTreeMap, HashSet};

use dirsnap_types::{Entry, EntryKind, Lister, ListingError, parent_path};

use crate::fixtures::timestamp;

/// A remote directory tree held in memory.
///
/// Paths are registered with [`dir`](Self::dir), [`file`](Self::file) and
/// [`other`](Self::other); every missing ancestor is created as a directory.
/// Children are returned in registration order, like a server would return
/// them in its own order.
///
/// # Example
/// ```
/// use dirsnap_testing::StubLister;
/// use dirsnap_types::Lister;
///
/// let mut lister = StubLister::new()
///     .dir("/root/a/x")
///     .file("/root/b/f")
///     .fail("/root/a/x");
///
/// assert_eq!(lister.list("/root").unwrap().len(), 2);
/// assert!(lister.list("/root/a/x").is_err());
/// assert_eq!(lister.calls(), ["/root", "/root/a/x"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct StubLister {
    dirs: BTreeMap<String, Vec<Entry>>,
    failing: HashSet<String>,
    calls: Vec<String>,
    markers: bool,
}

impl StubLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory (and its ancestors).
    pub fn dir(mut self, path: &str) -> Self {
        self.ensure_dir(path);
        self
    }

    /// Register a regular file (and its ancestor directories).
    pub fn file(self, path: &str) -> Self {
        self.leaf_entry(path, EntryKind::File)
    }

    /// Register a symlink or special entry.
    pub fn other(self, path: &str) -> Self {
        self.leaf_entry(path, EntryKind::Other)
    }

    /// Make every listing of `path` fail.
    pub fn fail(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    /// Prepend `.` and `..` to every listing, as `STAT`-style listings do.
    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    /// Every path passed to [`Lister::list`], in call order.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn was_listed(&self, path: &str) -> bool {
        self.calls.iter().any(|p| p == path)
    }

    /// Number of times `path` was listed.
    pub fn times_listed(&self, path: &str) -> usize {
        self.calls.iter().filter(|p| *p == path).count()
    }

    fn leaf_entry(mut self, path: &str, kind: EntryKind) -> Self {
        let parent = parent_path(path).to_string();
        self.ensure_dir(&parent);
        let name = path.rsplit('/').next().unwrap_or(path);
        let children = self.dirs.entry(parent.clone()).or_default();
        if !children.iter().any(|e| e.path == path) {
            children.push(Entry::new(&parent, name, kind, timestamp()));
        }
        self
    }

    fn ensure_dir(&mut self, path: &str) {
        // Missing directories from `path` up to the first registered ancestor
        let mut missing = Vec::new();
        let mut current = path.to_string();
        while !self.dirs.contains_key(&current) {
            let parent = parent_path(&current).to_string();
            let at_top = parent == current;
            missing.push(current);
            if at_top {
                break;
            }
            current = parent;
        }

        for dir in missing.into_iter().rev() {
            let parent = parent_path(&dir).to_string();
            if parent != dir {
                let name = dir.rsplit('/').next().unwrap_or(&dir);
                let entry = Entry::new(&parent, name, EntryKind::Directory, timestamp());
                self.dirs.entry(parent).or_default().push(entry);
            }
            self.dirs.insert(dir, Vec::new());
        }
    }
}

impl Lister for StubLister {
    fn list(&mut self, path: &str) -> Result<Vec<Entry>, ListingError> {
        self.calls.push(path.to_string());

        if self.failing.contains(path) {
            return Err(ListingError::Protocol(format!(
                "450 {}: Permission denied",
                path
            )));
        }

        let Some(children) = self.dirs.get(path) else {
            return Err(ListingError::Protocol(format!(
                "550 {}: No such file or directory",
                path
            )));
        };

        let mut listing = Vec::with_capacity(children.len() + 2);
        if self.markers {
            listing.push(Entry::new(path, ".", EntryKind::Directory, timestamp()));
            listing.push(Entry::new(path, "..", EntryKind::Directory, timestamp()));
        }
        listing.extend(children.iter().cloned());
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_are_created() {
        let mut lister = StubLister::new().dir("/root/a/x");

        let root = lister.list("/root").unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].path, "/root/a");
        assert!(root[0].is_dir());

        let a = lister.list("/root/a").unwrap();
        assert_eq!(a[0].path, "/root/a/x");
        assert!(lister.list("/root/a/x").unwrap().is_empty());
    }

    #[test]
    fn test_children_keep_registration_order() {
        let mut lister = StubLister::new()
            .dir("/root/b")
            .file("/root/a.txt")
            .dir("/root/a");

        let names: Vec<String> = lister
            .list("/root")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["b", "a.txt", "a"]);
    }

    #[test]
    fn test_unknown_path_fails() {
        let mut lister = StubLister::new().dir("/root");
        assert!(lister.list("/elsewhere").is_err());
        assert_eq!(lister.times_listed("/elsewhere"), 1);
    }

    #[test]
    fn test_markers_prepended() {
        let mut lister = StubLister::new().file("/root/f").with_markers();
        let names: Vec<String> = lister
            .list("/root")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, [".", "..", "f"]);
    }
}
