use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{LogLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "dirsnap")]
#[command(about = "Keep a local catalog of directory trees on remote FTP servers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file [default: $DIRSNAP_CONFIG or <config dir>/dirsnap/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log verbosity; RUST_LOG takes precedence when set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl configured sites and replace their stored snapshots
    Update {
        /// Crawl only this site
        #[arg(long)]
        site: Option<String>,

        /// Number of sites crawled at the same time
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        jobs: u16,
    },

    /// Remove stored sites that are no longer configured, then compact the database
    Gc {
        /// Only print what would be removed
        #[arg(long)]
        dry_run: bool,
    },

    /// Show stored directories, or per-site counts
    List {
        /// Restrict to one site
        #[arg(long)]
        site: Option<String>,

        /// Case-insensitive substring of the directory path
        #[arg(long)]
        pattern: Option<String>,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_defaults() {
        let cli = Cli::try_parse_from(["dirsnap", "update"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        match cli.command {
            Commands::Update { site, jobs } => {
                assert!(site.is_none());
                assert_eq!(jobs, 1);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["dirsnap", "update", "--jobs", "0"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dirsnap",
            "gc",
            "--dry-run",
            "--config",
            "/tmp/c.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert!(matches!(cli.command, Commands::Gc { dry_run: true }));
    }
}
