//! Adaptive walk of a remote directory tree.
//!
//! Remote trees are assumed to be "directories of directories" down to some
//! unknown depth, then directories of files. Before descending into a
//! subdirectory the walker peeks at it: if the peek shows any non-directory
//! entry the subdirectory is content-bearing, it is not descended, and the
//! remaining siblings in the same frame are not peeked either. The peek
//! result doubles as the listing of the subdirectory when the walker does
//! descend, so every path is listed at most once.

use dirsnap_types::{Entry, Lister, normalize_root};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Everything one walk listed.
#[derive(Debug, Clone, Default)]
pub struct RawTree {
    root: String,
    entries: Vec<Entry>,
    unlisted: Vec<String>,
    listings: usize,
}

impl RawTree {
    /// Normalized crawl root.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Listed entries in walk order, without `.`/`..` markers.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Directories whose listing failed and were treated as empty.
    pub fn unlisted(&self) -> &[String] {
        &self.unlisted
    }

    /// Number of listing calls the walk issued, the root included.
    pub fn listings(&self) -> usize {
        self.listings
    }

    /// False when at least one directory could not be listed.
    pub fn is_complete(&self) -> bool {
        self.unlisted.is_empty()
    }
}

/// Walk the tree under `root`.
///
/// Only a failure to list `root` itself is an error. Any other listing
/// failure is logged, recorded in [`RawTree::unlisted`] and the directory is
/// treated as empty.
pub fn walk<L: Lister + ?Sized>(lister: &mut L, root: &str) -> Result<RawTree> {
    let root = normalize_root(root);
    let listing = lister
        .list(&root)
        .map_err(|source| Error::ListingUnavailable {
            path: root.clone(),
            source,
        })?;

    let mut walker = Walker {
        lister,
        tree: RawTree {
            root: root.clone(),
            listings: 1,
            ..RawTree::default()
        },
    };
    walker.descend(listing);

    debug!(
        root = %root,
        entries = walker.tree.entries.len(),
        listings = walker.tree.listings,
        unlisted = walker.tree.unlisted.len(),
        "walk finished"
    );
    Ok(walker.tree)
}

struct Walker<'a, L: ?Sized> {
    lister: &'a mut L,
    tree: RawTree,
}

/// A directory being processed: its subdirectories not yet visited and the
/// deepest level it may still peek into.
///
/// `limit` belongs to the frame. Tightening it affects later siblings and
/// their subtrees, never the parent frame.
struct Frame {
    depth: usize,
    subdirs: std::vec::IntoIter<String>,
    limit: Option<usize>,
}

impl<L: Lister + ?Sized> Walker<'_, L> {
    fn list(&mut self, path: &str) -> Vec<Entry> {
        self.tree.listings += 1;
        match self.lister.list(path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path, error = %err, "listing failed, treating directory as empty");
                self.tree.unlisted.push(path.to_string());
                Vec::new()
            }
        }
    }

    /// Record `listing`, the content of a directory at `depth`, and return
    /// the frame that will visit its subdirectories.
    fn open(&mut self, depth: usize, listing: Vec<Entry>, limit: Option<usize>) -> Frame {
        let listing: Vec<Entry> = listing
            .into_iter()
            .filter(|e| !e.is_current_or_parent())
            .collect();
        let subdirs: Vec<String> = listing
            .iter()
            .filter(|e| e.is_dir())
            .map(|e| e.path.clone())
            .collect();
        self.tree.entries.extend(listing);

        Frame {
            depth,
            subdirs: subdirs.into_iter(),
            limit,
        }
    }

    /// Depth-first over an explicit stack, so tree depth is bounded by
    /// memory rather than by the thread's stack.
    fn descend(&mut self, listing: Vec<Entry>) {
        let root = self.open(0, listing, None);
        let mut stack = vec![root];

        while let Some(frame) = stack.last_mut() {
            let Some(subdir) = frame.subdirs.next() else {
                stack.pop();
                continue;
            };
            let depth = frame.depth;
            let limit = frame.limit;
            let child_depth = depth + 1;

            if limit.is_some_and(|max| child_depth > max) {
                debug!(path = %subdir, depth = child_depth, "past depth limit, not peeking");
                continue;
            }

            let peek = self.list(&subdir);
            if holds_content(&peek) {
                debug!(path = %subdir, depth = child_depth, "content-bearing, stopping here");
                if let Some(frame) = stack.last_mut() {
                    frame.limit = Some(depth);
                }
                self.tree
                    .entries
                    .extend(peek.into_iter().filter(|e| !e.is_current_or_parent()));
                continue;
            }

            let child = self.open(child_depth, peek, limit);
            stack.push(child);
        }
    }
}

fn holds_content(listing: &[Entry]) -> bool {
    listing
        .iter()
        .any(|e| !e.is_current_or_parent() && !e.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirsnap_testing::StubLister;

    fn paths(tree: &RawTree) -> Vec<&str> {
        tree.entries().iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_empty_root() {
        let mut lister = StubLister::new().dir("/root");
        let tree = walk(&mut lister, "/root").unwrap();

        assert!(tree.entries().is_empty());
        assert_eq!(tree.listings(), 1);
        assert_eq!(lister.calls(), ["/root"]);
    }

    #[test]
    fn test_root_failure_is_an_error() {
        let mut lister = StubLister::new().dir("/root/a").fail("/root");
        let err = walk(&mut lister, "/root").unwrap_err();

        assert!(matches!(err, Error::ListingUnavailable { ref path, .. } if path == "/root"));
        assert!(err.to_string().contains("/root"));
    }

    #[test]
    fn test_root_is_normalized() {
        let mut lister = StubLister::new().dir("/root/a");
        let tree = walk(&mut lister, "/root/").unwrap();

        assert_eq!(tree.root(), "/root");
        assert_eq!(lister.calls()[0], "/root");
    }

    #[test]
    fn test_markers_never_reach_the_tree() {
        let mut lister = StubLister::new()
            .dir("/root/a/x")
            .file("/root/b/f")
            .with_markers();
        let tree = walk(&mut lister, "/root").unwrap();

        assert!(tree.entries().iter().all(|e| !e.is_current_or_parent()));
        assert!(!lister.was_listed("/root/."));
        assert!(!lister.was_listed("/root/.."));
    }

    #[test]
    fn test_files_only_root_lists_once() {
        let mut lister = StubLister::new().file("/root/a.iso").file("/root/b.iso");
        let tree = walk(&mut lister, "/root").unwrap();

        assert_eq!(paths(&tree), ["/root/a.iso", "/root/b.iso"]);
        assert_eq!(tree.listings(), 1);
    }

    #[test]
    fn test_every_path_listed_at_most_once() {
        let mut lister = StubLister::new()
            .dir("/root/a/x/1")
            .dir("/root/a/y")
            .file("/root/b/f")
            .dir("/root/c");
        let tree = walk(&mut lister, "/root").unwrap();

        for path in lister.calls() {
            assert_eq!(lister.times_listed(path), 1, "{} listed twice", path);
        }
        assert_eq!(tree.listings(), lister.calls().len());
    }

    #[test]
    fn test_content_stops_later_siblings() {
        // b holds files, so c (same level, after b) is not peeked at all
        let mut lister = StubLister::new()
            .dir("/root/a/x")
            .file("/root/b/f")
            .dir("/root/c/z");
        let tree = walk(&mut lister, "/root").unwrap();

        assert!(lister.was_listed("/root/a"));
        assert!(lister.was_listed("/root/a/x"));
        assert!(lister.was_listed("/root/b"));
        assert!(!lister.was_listed("/root/c"));
        assert!(paths(&tree).contains(&"/root/c"));
        assert!(!paths(&tree).contains(&"/root/c/z"));
    }

    #[test]
    fn test_limit_does_not_flow_to_parent_siblings() {
        // a/x holds files; that only stops a's later children, not b
        let mut lister = StubLister::new()
            .file("/root/a/x/f")
            .dir("/root/a/y")
            .dir("/root/b/z");
        let tree = walk(&mut lister, "/root").unwrap();

        assert!(lister.was_listed("/root/a/x"));
        assert!(!lister.was_listed("/root/a/y"));
        assert!(lister.was_listed("/root/b"));
        assert!(lister.was_listed("/root/b/z"));
        assert!(paths(&tree).contains(&"/root/b/z"));
    }

    #[test]
    fn test_other_entries_count_as_content() {
        let mut lister = StubLister::new().other("/root/a/link").dir("/root/a/sub");
        let tree = walk(&mut lister, "/root").unwrap();

        assert!(lister.was_listed("/root/a"));
        assert!(!lister.was_listed("/root/a/sub"));
        assert!(paths(&tree).contains(&"/root/a/sub"));
    }

    #[test]
    fn test_failed_peek_is_recorded() {
        let mut lister = StubLister::new()
            .dir("/root/a")
            .dir("/root/b")
            .fail("/root/a");
        let tree = walk(&mut lister, "/root").unwrap();

        assert_eq!(tree.unlisted(), ["/root/a"]);
        assert!(!tree.is_complete());
        assert!(lister.was_listed("/root/b"));
    }
}
