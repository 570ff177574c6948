//! Package installation

use anyhow::Result;

use super::common::{print_changes, split_targets};
use crate::cli::{CliContext, style};
use crate::core::CommandRunner;
use crate::package_managers::{InstallRequest, SlackpkgManager};

/// Install packages by name or from package files
pub async fn install<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    packages: &[String],
    sources: &[String],
    refresh: bool,
    reinstall: bool,
) -> Result<()> {
    let targets = split_targets(packages, sources);
    if targets.is_empty() {
        anyhow::bail!("Nothing to install: pass package names or --source files");
    }

    if !ctx.json && !ctx.quiet {
        println!("{}", style::header("Installing packages"));
    }

    let changes = manager
        .install(InstallRequest {
            targets,
            refresh,
            reinstall,
        })
        .await?;

    print_changes(ctx, &changes, &[]);
    Ok(())
}
