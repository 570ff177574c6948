//! Repository metadata refresh

use anyhow::Result;

use crate::cli::json_output::{RefreshResult, print_json};
use crate::cli::{CliContext, style};
use crate::core::CommandRunner;
use crate::package_managers::SlackpkgManager;

/// Refresh repository metadata via slackpkg
pub async fn refresh<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
) -> Result<()> {
    let updated = manager.refresh_db().await?;

    if ctx.json {
        print_json(&RefreshResult { updated });
    } else if !ctx.quiet {
        match updated {
            Some(true) => println!("{}", style::success("Package database updated")),
            _ => println!("{}", style::info("Package database is already up to date")),
        }
    }
    Ok(())
}
