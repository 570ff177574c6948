//! Installed package listing

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::json_output::print_json;
use crate::cli::{CliContext, style};
use crate::core::{CommandRunner, Versions};
use crate::package_managers::{ListOptions, SlackpkgManager};

/// List installed packages
pub fn list<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    versions_as_list: bool,
    root: Option<PathBuf>,
    removed: bool,
    purge_desired: bool,
) -> Result<()> {
    let installed = manager.list_pkgs(&ListOptions {
        root,
        removed,
        purge_desired,
        use_cache: false,
    })?;

    let rendered = installed.render(versions_as_list);
    if ctx.json {
        print_json(&rendered);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    if installed.is_empty() {
        println!("{}", style::info("No packages installed"));
        return Ok(());
    }

    match rendered {
        Versions::List(map) => {
            for (name, versions) in &map {
                for version in versions {
                    println!("{} {}", style::package(name), style::version(version));
                }
            }
        }
        Versions::Joined(map) => {
            for (name, version) in &map {
                println!("{} {}", style::package(name), style::version(version));
            }
        }
    }
    println!(
        "\n{}",
        style::dim(&format!("{} packages installed", installed.len()))
    );

    Ok(())
}
