use anyhow::Result;
use dirsnap_index::Database;
use dirsnap_runtime::{Config, FtpConnector, SiteReport, UpdateService};

use super::Painter;

pub fn handle(db: &Database, config: &Config, site: Option<&str>, jobs: usize) -> Result<()> {
    let sites = config.select_sites(site)?;

    let connector = FtpConnector;
    let report = UpdateService::new(db, &connector)
        .with_jobs(jobs)
        .run(&sites)?;

    let painter = Painter::stdout();
    for site in &report.sites {
        match site {
            SiteReport::Crawled { site, stats } => {
                let detail = if stats.unlisted > 0 {
                    format!("({} listings, {} unlisted)", stats.listings, stats.unlisted)
                } else {
                    format!("({} listings)", stats.listings)
                };
                println!(
                    "{} {}: {} directories {}",
                    painter.ok("ok"),
                    site,
                    stats.saved,
                    painter.dim(&detail)
                );
            }
            SiteReport::Failed { site, reason } => {
                println!("{} {}: {}", painter.fail("failed"), site, reason);
            }
        }
    }

    println!("{} crawled, {} failed", report.crawled(), report.failed());

    Ok(())
}
