//! Assertions over leaf sets.

use std::collections::BTreeSet;

use dirsnap_types::LeafDir;

/// Leaf paths as a sorted set, for order-insensitive comparison.
pub fn leaf_paths(leaves: &[LeafDir]) -> BTreeSet<String> {
    leaves.iter().map(|l| l.path.clone()).collect()
}

/// Assert the leaf set holds exactly `expected`, ignoring order.
pub fn assert_leaf_paths(leaves: &[LeafDir], expected: &[&str]) {
    let actual = leaf_paths(leaves);
    let expected: BTreeSet<String> = expected.iter().map(|p| p.to_string()).collect();
    assert_eq!(actual, expected, "leaf paths differ");
}

/// Assert no leaf is an ancestor of another leaf.
pub fn assert_no_ancestors(leaves: &[LeafDir]) {
    for a in leaves {
        let prefix = if a.path.ends_with('/') {
            a.path.clone()
        } else {
            format!("{}/", a.path)
        };
        for b in leaves {
            assert!(
                !b.path.starts_with(&prefix),
                "{} is an ancestor of {}",
                a.path,
                b.path
            );
        }
    }
}
