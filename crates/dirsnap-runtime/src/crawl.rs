use dirsnap_engine::{extract_leaves, walk};
use dirsnap_index::Database;
use dirsnap_types::Lister;
use serde::Serialize;
use tracing::{info, warn};

use crate::{Result, SiteConfig};

/// What one successful crawl did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Entries seen by the walk, files included.
    pub entries: usize,
    /// Listing calls issued.
    pub listings: usize,
    /// Directories that could not be listed and count as empty.
    pub unlisted: usize,
    /// Leaf directories stored as the new snapshot.
    pub saved: usize,
}

/// Walk `site` through `lister` and replace its snapshot.
///
/// A root that cannot be listed fails with [`Error::Walk`](crate::Error::Walk)
/// and leaves the stored snapshot untouched. Database errors are returned
/// as [`Error::Index`](crate::Error::Index).
pub fn crawl_site<L: Lister + ?Sized>(
    db: &Database,
    site: &SiteConfig,
    lister: &mut L,
) -> Result<CrawlStats> {
    let tree = walk(lister, &site.root)?;
    if !tree.is_complete() {
        warn!(
            site = %site.name,
            unlisted = tree.unlisted().len(),
            "some directories could not be listed; snapshot is partial"
        );
    }

    let leaves = extract_leaves(tree.entries());
    let saved = db.replace_directories(&site.name, &leaves)?;
    info!(site = %site.name, directories = saved, listings = tree.listings(), "saved snapshot");

    Ok(CrawlStats {
        entries: tree.entries().len(),
        listings: tree.listings(),
        unlisted: tree.unlisted().len(),
        saved,
    })
}
