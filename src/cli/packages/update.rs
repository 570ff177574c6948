//! Upgrades: applying them and listing what is available

use anyhow::Result;

use super::common::{print_changes, print_versions, split_targets};
use crate::cli::{CliContext, style};
use crate::core::CommandRunner;
use crate::package_managers::{SlackpkgManager, UpgradeRequest};

/// Upgrade the named packages, or the whole system when none are given
pub async fn upgrade<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    packages: &[String],
    sources: &[String],
    refresh: bool,
) -> Result<()> {
    let targets = split_targets(packages, sources);

    if !ctx.json && !ctx.quiet {
        if targets.is_empty() {
            println!("{}", style::header("Upgrading all packages"));
        } else {
            println!("{}", style::header("Upgrading packages"));
        }
    }

    let changes = manager.upgrade(UpgradeRequest { targets, refresh }).await?;

    print_changes(ctx, &changes, &[]);
    Ok(())
}

/// List packages with an upgrade available
pub async fn list_upgrades<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    no_refresh: bool,
) -> Result<()> {
    let refresh = !no_refresh && manager.settings().refresh_before_list_upgrades;
    let upgrades = manager.list_upgrades(refresh).await?;

    print_versions(ctx, &upgrades, "All packages are up to date");
    Ok(())
}
