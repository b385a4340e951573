use std::collections::HashSet;

use dirsnap_types::{Entry, LeafDir, parent_path};

/// Reduce walked entries to the deepest directory of every branch.
///
/// A directory is kept unless another directory in `entries` sits directly
/// under it. Files never make their parent a non-leaf. Duplicate paths are
/// collapsed to their first occurrence and input order is preserved.
pub fn extract_leaves(entries: &[Entry]) -> Vec<LeafDir> {
    let dirs = || {
        entries
            .iter()
            .filter(|e| e.is_dir() && !e.is_current_or_parent())
    };

    let parents: HashSet<&str> = dirs().map(|e| parent_path(&e.path)).collect();

    let mut seen = HashSet::new();
    dirs()
        .filter(|e| !parents.contains(e.path.as_str()))
        .filter(|e| seen.insert(e.path.as_str()))
        .map(LeafDir::from)
        .collect()
}
