use anyhow::{Result, bail};
use dirsnap_index::{Database, DirectoryRecord, SiteSummary};

use crate::types::OutputFormat;

pub fn handle(
    db: &Database,
    site: Option<&str>,
    pattern: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(name) = site
        && db.get_site(name)?.is_none()
    {
        bail!("no snapshot stored for site '{}'", name);
    }

    match (site, pattern) {
        (None, None) => print_summaries(&db.list_site_summaries()?, format),
        (Some(site), None) => print_directories(&db.list_directories(site)?, false, format),
        (site, Some(pattern)) => {
            let records = db.search_directories(pattern, site)?;
            print_directories(&records, site.is_none(), format)
        }
    }
}

fn print_summaries(summaries: &[SiteSummary], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summaries)?),
        OutputFormat::Plain => {
            if summaries.is_empty() {
                eprintln!("No sites crawled yet. Run 'dirsnap update' first.");
            }
            let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
            for summary in summaries {
                println!(
                    "{:<width$}  {}",
                    summary.name,
                    summary.directory_count,
                    width = width
                );
            }
        }
    }
    Ok(())
}

fn print_directories(
    records: &[DirectoryRecord],
    with_site: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Plain => {
            for record in records {
                if with_site {
                    println!("{}\t{}", record.site, record.path);
                } else {
                    println!("{}", record.path);
                }
            }
        }
    }
    Ok(())
}
