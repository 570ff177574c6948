//! Request types shared by package manager backends

use std::path::PathBuf;

use crate::core::{TargetRequest, split_input};

/// Options for listing installed packages
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Alternate filesystem root; the configured root when unset
    pub root: Option<PathBuf>,
    /// Removed packages are not tracked; setting this yields an empty list
    pub removed: bool,
    /// Purge-desired packages are not tracked; setting this yields an empty list
    pub purge_desired: bool,
    /// Reuse the last listing of the same root when available
    pub use_cache: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    pub targets: TargetRequest,
    /// Refresh repository metadata first
    pub refresh: bool,
    /// Reinstall packages that are already installed
    pub reinstall: bool,
}

/// Upgrade request; empty targets mean "upgrade the whole system"
#[derive(Debug, Clone, Default)]
pub struct UpgradeRequest {
    pub targets: TargetRequest,
    pub refresh: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RemoveRequest {
    pub name: Option<String>,
    /// Package names; entries may themselves be comma-separated lists
    pub pkgs: Vec<String>,
}

impl RemoveRequest {
    /// Flattened list of package names to remove
    #[must_use]
    pub fn packages(&self) -> Vec<String> {
        if self.pkgs.is_empty() {
            self.name.iter().filter(|n| !n.is_empty()).cloned().collect()
        } else {
            self.pkgs.iter().flat_map(|p| split_input(p)).collect()
        }
    }
}
