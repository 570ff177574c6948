//! Command-line argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

/// slackpm - a generic package-manager front-end over Slackware's slackpkg
///
/// Lists, installs, upgrades and removes packages through slackpkg and the
/// pkgtools (installpkg, upgradepkg, removepkg), reporting what changed.
#[derive(Parser, Debug)]
#[command(name = "slackpm")]
#[command(version)]
#[command(about = "A generic package-manager front-end over Slackware's slackpkg", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip the slackpkg / Slackware availability check
    #[arg(long, global = true, env = "SLACKPM_SKIP_CHECKS")]
    pub skip_checks: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed packages
    #[command(visible_alias = "ls")]
    List {
        /// Report every installed version as a list instead of a joined string
        #[arg(long)]
        versions_as_list: bool,
        /// Alternate filesystem root holding var/log/packages
        #[arg(long)]
        root: Option<PathBuf>,
        /// List removed packages (not tracked, always empty)
        #[arg(long)]
        removed: bool,
        /// List purge-desired packages (not tracked, always empty)
        #[arg(long)]
        purge_desired: bool,
    },

    /// Refresh repository metadata (slackpkg check-updates / update)
    #[command(visible_alias = "sync")]
    Refresh,

    /// Install packages by name, or from package files / URLs
    #[command(visible_alias = "i")]
    Install {
        /// Package names, or paths / URLs of package files
        packages: Vec<String>,
        /// Additional package files or URLs
        #[arg(short, long = "source")]
        sources: Vec<String>,
        /// Refresh repository metadata first
        #[arg(long)]
        refresh: bool,
        /// Reinstall packages that are already installed
        #[arg(long)]
        reinstall: bool,
    },

    /// Upgrade packages; with no arguments the whole system is upgraded
    #[command(visible_alias = "u")]
    Upgrade {
        /// Package names, or paths / URLs of package files
        packages: Vec<String>,
        /// Additional package files or URLs
        #[arg(short, long = "source")]
        sources: Vec<String>,
        /// Refresh repository metadata first
        #[arg(long)]
        refresh: bool,
    },

    /// Remove packages
    #[command(visible_alias = "r")]
    Remove {
        /// Package names (comma-separated lists are accepted)
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// List packages with an upgrade available
    ListUpgrades {
        /// Do not refresh repository metadata first
        #[arg(long)]
        no_refresh: bool,
    },

    /// Show the latest available version of packages ("" when up to date)
    LatestVersion {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Do not refresh repository metadata first
        #[arg(long)]
        no_refresh: bool,
    },

    /// Check whether an upgrade is available for a package
    UpgradeAvailable {
        package: String,
        /// Do not refresh repository metadata first
        #[arg(long)]
        no_refresh: bool,
    },

    /// Show installed versions of packages
    Version {
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key
        key: Option<String>,
        /// Configuration value (if setting)
        value: Option<String>,
    },
}

impl Commands {
    /// Whether the command talks to slackpkg or the package database
    #[must_use]
    pub const fn needs_slackpkg(&self) -> bool {
        !matches!(self, Self::Config { .. })
    }

    /// Whether the command changes the system and therefore needs root.
    /// Queries count when they refresh the repository metadata first.
    #[must_use]
    pub const fn needs_root(&self, settings: &Settings) -> bool {
        match self {
            Self::Refresh | Self::Install { .. } | Self::Upgrade { .. } | Self::Remove { .. } => {
                true
            }
            Self::ListUpgrades { no_refresh } => {
                !*no_refresh && settings.refresh_before_list_upgrades
            }
            Self::LatestVersion { no_refresh, .. } | Self::UpgradeAvailable { no_refresh, .. } => {
                !*no_refresh && settings.refresh_before_latest_version
            }
            Self::List { .. } | Self::Version { .. } | Self::Config { .. } => false,
        }
    }
}
