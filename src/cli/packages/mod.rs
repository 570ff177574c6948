//! Package management CLI operations
//!
//! This module provides all package-related CLI functionality:
//! - List: Installed packages
//! - Refresh: Synchronize repository metadata
//! - Install / Upgrade / Remove: Change the system and report what changed
//! - Upgrades: Available upgrades, latest and installed versions

mod common;
mod install;
mod list;
mod remove;
mod sync_db;
mod update;
mod versions;

pub use common::{print_changes, split_targets};
pub use install::install;
pub use list::list;
pub use remove::remove;
pub use sync_db::refresh;
pub use update::{list_upgrades, upgrade};
pub use versions::{latest_version, upgrade_available, version};
