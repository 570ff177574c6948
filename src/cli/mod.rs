//! CLI module for slackpm
//!
//! Handles command-line argument parsing, dispatch and output.

mod args;
pub mod commands;
pub mod json_output;
pub mod packages;
pub mod style;

pub use args::{Cli, Commands};

/// Global context for CLI command execution
#[derive(Debug, Clone, Copy, Default)]
pub struct CliContext {
    pub verbose: u8,
    pub json: bool,
    pub quiet: bool,
}

impl CliContext {
    /// Log level for `-q` / `-v` / `-vv`; `RUST_LOG` overrides it
    #[must_use]
    pub const fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::WARN,
            (false, 0) => tracing::Level::INFO,
            (false, 1) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        }
    }
}

impl From<&Cli> for CliContext {
    fn from(cli: &Cli) -> Self {
        Self {
            verbose: cli.verbose,
            json: cli.json,
            quiet: cli.quiet,
        }
    }
}
