use dirsnap_index::{Database, SiteRecord};
use serde::Serialize;
use tracing::info;

use crate::{Config, Result};

#[derive(Debug, Clone, Serialize)]
pub struct GcReport {
    /// Sites removed, or that would be removed on a dry run.
    pub removed: Vec<SiteRecord>,
    pub dry_run: bool,
}

/// Drop stored sites that are no longer in `config`, then vacuum.
///
/// A dry run only reports; nothing is deleted or vacuumed.
pub fn collect_garbage(db: &Database, config: &Config, dry_run: bool) -> Result<GcReport> {
    let removed = db.garbage_collect_sites(&config.site_names(), dry_run)?;

    if !dry_run {
        info!(sites = removed.len(), "running vacuum");
        db.vacuum()?;
    }

    Ok(GcReport { removed, dry_run })
}
