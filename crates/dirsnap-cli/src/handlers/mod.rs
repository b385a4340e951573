pub mod gc;
pub mod list;
pub mod update;

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// Colors status words when stdout is a terminal.
pub(crate) struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn stdout() -> Self {
        Self {
            enabled: std::io::stdout().is_terminal(),
        }
    }

    pub fn ok(&self, text: &str) -> String {
        if self.enabled {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn fail(&self, text: &str) -> String {
        if self.enabled {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
