//! Version queries: latest available, upgrade availability, installed

use anyhow::Result;

use super::common::print_versions;
use crate::cli::json_output::{UpgradeAvailable, print_json};
use crate::cli::{CliContext, style};
use crate::core::CommandRunner;
use crate::package_managers::SlackpkgManager;

/// Latest available version per package; `-` when already up to date
pub async fn latest_version<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    packages: &[String],
    no_refresh: bool,
) -> Result<()> {
    let refresh = !no_refresh && manager.settings().refresh_before_latest_version;
    let latest = manager.latest_version(packages, refresh).await?;

    print_versions(ctx, &latest, "No packages requested");
    Ok(())
}

pub async fn upgrade_available<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    package: &str,
    no_refresh: bool,
) -> Result<()> {
    let refresh = !no_refresh && manager.settings().refresh_before_latest_version;
    let available = manager.upgrade_available(package, refresh).await?;

    if ctx.json {
        print_json(&UpgradeAvailable { package, available });
    } else if !ctx.quiet {
        if available {
            println!("{}", style::success(&format!("An upgrade is available for {package}")));
        } else {
            println!("{}", style::info(&format!("No upgrade available for {package}")));
        }
    }
    Ok(())
}

/// Installed version per package; `-` when not installed
pub fn version<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    packages: &[String],
) -> Result<()> {
    let versions = manager.version(packages)?;

    print_versions(ctx, &versions, "No packages requested");
    Ok(())
}
