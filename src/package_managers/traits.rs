//! Package manager trait definition

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::core::{ChangeSet, InstalledSet, Result};
use crate::package_managers::types::{InstallRequest, ListOptions, RemoveRequest, UpgradeRequest};

/// Trait for package manager backends
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Get the name of this package manager
    fn name(&self) -> &'static str;

    /// List installed packages
    async fn list_installed(&self, options: &ListOptions) -> Result<InstalledSet>;

    /// Refresh repository metadata. `Some(true)` when updates were fetched,
    /// `None` when there was nothing to fetch.
    async fn refresh(&self) -> Result<Option<bool>>;

    /// Install packages, returning what changed
    async fn install(&self, request: InstallRequest) -> Result<ChangeSet>;

    /// Upgrade packages (or the whole system), returning what changed
    async fn upgrade(&self, request: UpgradeRequest) -> Result<ChangeSet>;

    /// Remove packages, returning what changed
    async fn remove(&self, request: RemoveRequest) -> Result<ChangeSet>;

    /// Packages with a newer version available: name -> new version
    async fn list_upgrades(&self, refresh: bool) -> Result<BTreeMap<String, String>>;
}
