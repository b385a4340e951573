use std::io;

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::types::LogLevel;

const CRATES: [&str; 4] = ["dirsnap", "dirsnap_runtime", "dirsnap_engine", "dirsnap_index"];

/// Send log records to stderr so stdout stays clean for `list` output.
///
/// `RUST_LOG`, when set, replaces the `--log-level` filter.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    // Fails only when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

/// Our crates at `level`, dependencies at `warn`.
fn default_filter(level: LogLevel) -> EnvFilter {
    let directives: Vec<String> = CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect();
    EnvFilter::new(format!("warn,{}", directives.join(",")))
}
