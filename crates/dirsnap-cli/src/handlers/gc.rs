use anyhow::Result;
use dirsnap_index::Database;
use dirsnap_runtime::{Config, collect_garbage};

pub fn handle(db: &Database, config: &Config, dry_run: bool) -> Result<()> {
    let report = collect_garbage(db, config, dry_run)?;

    let verb = if report.dry_run { "would delete" } else { "deleted" };
    for site in &report.removed {
        println!("{} {}", verb, site.name);
    }

    if report.removed.is_empty() {
        eprintln!("No unconfigured sites found.");
    }

    Ok(())
}
