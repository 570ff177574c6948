//! Error types for slackpm with helpful suggestions

use thiserror::Error;

use super::types::ChangeSet;

/// Convenience Result type for slackpm operations
pub type Result<T> = std::result::Result<T, SlackError>;

#[derive(Error, Debug)]
pub enum SlackError {
    /// One or more external commands failed. `changes` holds whatever the
    /// operation managed to do before (or despite) the failures.
    #[error("{message}: {}", errors.join("; "))]
    CommandExecution {
        message: String,
        changes: ChangeSet,
        errors: Vec<String>,
    },

    /// Syncing repository metadata failed. `updated` is what
    /// `check-updates` reported before the failure.
    #[error("Problems encountered refreshing the package database: {}", errors.join("; "))]
    RefreshFailed {
        updated: Option<bool>,
        errors: Vec<String>,
    },

    #[error("Invalid package targets: {0}")]
    InvalidTargets(String),

    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error("slackpkg is not available: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Other(String),
}

impl SlackError {
    pub(crate) fn command_execution(
        message: &str,
        changes: ChangeSet,
        errors: Vec<String>,
    ) -> Self {
        Self::CommandExecution {
            message: message.to_string(),
            changes,
            errors,
        }
    }

    /// Get a helpful suggestion for how to fix this error
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::CommandExecution { .. } | Self::RefreshFailed { .. } => {
                Some("Re-run with -v to see the exact commands and their output")
            }
            Self::InvalidTargets(_) => {
                Some("Pass either package names or package files, not both")
            }
            Self::InvalidPackageName(_) => {
                Some("Package files are named <name>-<version>-<arch>-<build>.t?z")
            }
            Self::Unavailable(_) => Some(
                "Install slackpkg, or pass --skip-checks if this is not a Slackware host",
            ),
            Self::PermissionDenied(_) => {
                Some("Try running with sudo, or check file/directory permissions")
            }
            Self::Network(_) => Some(
                "Check your internet connection and try again.\nIf behind a proxy, set HTTP_PROXY/HTTPS_PROXY",
            ),
            Self::Config(_) => Some(
                "Check ~/.config/slackpm/config.toml for syntax errors.\nReset with: rm ~/.config/slackpm/config.toml",
            ),
            Self::Io(_) | Self::Other(_) => None,
        }
    }
}

/// Common error suggestions for anyhow errors
pub fn suggest_for_anyhow(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(slack) = err.downcast_ref::<SlackError>() {
        return slack.suggestion();
    }

    let msg = err.to_string().to_lowercase();

    if msg.contains("permission denied") || msg.contains("access denied") {
        return Some("Try running with sudo, or check file/directory permissions");
    }
    if msg.contains("no such file") || msg.contains("file not found") {
        return Some("Check that the file path is correct and the file exists");
    }

    None
}
