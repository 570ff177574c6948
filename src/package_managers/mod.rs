//! Package manager backends for system packages

pub mod pkgdb;
mod slackpkg;
mod traits;
pub mod types;

pub use slackpkg::{SlackpkgManager, parse_upgrade_listing};
pub use traits::PackageManager;
pub use types::{InstallRequest, ListOptions, RemoveRequest, UpgradeRequest};
