use std::path::Path;

use anyhow::{Context, Result};
use dirsnap_index::Database;
use dirsnap_runtime::Config;

use super::args::{Cli, Commands};
use super::handlers;
use super::logging;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config = load_config(cli.config.as_deref())?;
    let db = open_database(&config)?;

    match cli.command {
        Commands::Update { site, jobs } => {
            handlers::update::handle(&db, &config, site.as_deref(), usize::from(jobs))
        }
        Commands::Gc { dry_run } => handlers::gc::handle(&db, &config, dry_run),
        Commands::List {
            site,
            pattern,
            format,
        } => handlers::list::handle(&db, site.as_deref(), pattern.as_deref(), format),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };

    Config::load_from(&path).with_context(|| format!("failed to load {}", path.display()))
}

fn open_database(config: &Config) -> Result<Database> {
    let db_path = config.database_path()?;
    Database::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))
}
