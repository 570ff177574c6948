//! Package removal

use anyhow::Result;

use super::common::print_changes;
use crate::cli::{CliContext, style};
use crate::core::CommandRunner;
use crate::package_managers::{RemoveRequest, SlackpkgManager};

/// Remove packages with removepkg
pub async fn remove<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    packages: &[String],
) -> Result<()> {
    if !ctx.json && !ctx.quiet {
        println!("{}", style::header("Removing packages"));
    }

    let changes = manager
        .remove(RemoveRequest {
            name: None,
            pkgs: packages.to_vec(),
        })
        .await?;

    print_changes(ctx, &changes, &[]);
    Ok(())
}
