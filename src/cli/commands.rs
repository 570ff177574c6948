//! Command dispatch and non-package commands

use anyhow::Result;

use crate::cli::json_output::{ErrorReport, print_json};
use crate::cli::packages::{self, print_changes};
use crate::cli::{Cli, CliContext, Commands, style};
use crate::config::{KEYS, Settings, unknown_key};
use crate::core::{CommandRunner, SlackError, require_root, suggest_for_anyhow};
use crate::package_managers::SlackpkgManager;

/// Run a parsed command line against the system
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext::from(&cli);

    if let Commands::Config { key, value } = &cli.command {
        return config(&ctx, key.as_deref(), value.as_deref());
    }

    let settings = Settings::load()?;
    let manager = SlackpkgManager::new(settings);

    if cli.command.needs_slackpkg() && !cli.skip_checks {
        manager.check_available()?;
    }
    if cli.command.needs_root(manager.settings()) && !cli.skip_checks {
        require_root(command_name(&cli.command))?;
    }

    dispatch(&ctx, &manager, cli.command).await
}

/// Dispatch a package command to its handler
pub async fn dispatch<R: CommandRunner>(
    ctx: &CliContext,
    manager: &SlackpkgManager<R>,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::List {
            versions_as_list,
            root,
            removed,
            purge_desired,
        } => packages::list(ctx, manager, versions_as_list, root, removed, purge_desired),
        Commands::Refresh => packages::refresh(ctx, manager).await,
        Commands::Install {
            packages: pkgs,
            sources,
            refresh,
            reinstall,
        } => packages::install(ctx, manager, &pkgs, &sources, refresh, reinstall).await,
        Commands::Upgrade {
            packages: pkgs,
            sources,
            refresh,
        } => packages::upgrade(ctx, manager, &pkgs, &sources, refresh).await,
        Commands::Remove { packages: pkgs } => packages::remove(ctx, manager, &pkgs).await,
        Commands::ListUpgrades { no_refresh } => {
            packages::list_upgrades(ctx, manager, no_refresh).await
        }
        Commands::LatestVersion {
            packages: pkgs,
            no_refresh,
        } => packages::latest_version(ctx, manager, &pkgs, no_refresh).await,
        Commands::UpgradeAvailable {
            package,
            no_refresh,
        } => packages::upgrade_available(ctx, manager, &package, no_refresh).await,
        Commands::Version { packages: pkgs } => packages::version(ctx, manager, &pkgs),
        Commands::Config { key, value } => config(ctx, key.as_deref(), value.as_deref()),
    }
}

/// Report a failed command. Partial changes carried by the error are
/// printed before the error itself.
pub fn report_error(ctx: &CliContext, err: &anyhow::Error) {
    let (changes, errors) = match err.downcast_ref::<SlackError>() {
        Some(SlackError::CommandExecution {
            changes, errors, ..
        }) => (Some(changes), errors.as_slice()),
        Some(SlackError::RefreshFailed { errors, .. }) => (None, errors.as_slice()),
        _ => (None, &[][..]),
    };

    if ctx.json {
        print_json(&ErrorReport {
            error: format!("{err:#}"),
            suggestion: suggest_for_anyhow(err),
            changes,
            errors,
        });
        return;
    }

    if let Some(changes) = changes
        && !changes.is_empty()
    {
        print_changes(ctx, changes, errors);
    }

    eprintln!("{}", style::error(&format!("{err:#}")));
    if let Some(suggestion) = suggest_for_anyhow(err) {
        eprintln!("\n  {}", style::dim(suggestion));
    }
}

/// Get or set configuration
pub fn config(ctx: &CliContext, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut settings = Settings::load()?;

    match (key, value) {
        (Some(k), Some(v)) => {
            settings.set(k, v)?;
            settings.save()?;
            if !ctx.quiet {
                println!("{}", style::success(&format!("Set {k} = {v}")));
            }
        }
        (Some(k), None) => {
            let Some(current) = settings.get(k) else {
                return Err(unknown_key(k));
            };
            if ctx.json {
                print_json(&std::collections::BTreeMap::from([(k, current)]));
            } else {
                println!("{current}");
            }
        }
        (None, _) => {
            if ctx.json {
                let resolved: std::collections::BTreeMap<&str, String> = KEYS
                    .iter()
                    .map(|k| (*k, settings.get(k).unwrap_or_default()))
                    .collect();
                print_json(&resolved);
                return Ok(());
            }
            println!(
                "{}\n",
                style::header(&format!(
                    "Configuration ({})",
                    Settings::config_path().display()
                ))
            );
            for k in KEYS {
                let current = settings.get(k).unwrap_or_default();
                println!("  {} = {}", style::package(k), style::version(&current));
            }
        }
    }
    Ok(())
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List { .. } => "list",
        Commands::Refresh => "refresh",
        Commands::Install { .. } => "install",
        Commands::Upgrade { .. } => "upgrade",
        Commands::Remove { .. } => "remove",
        Commands::ListUpgrades { .. } => "list-upgrades",
        Commands::LatestVersion { .. } => "latest-version",
        Commands::UpgradeAvailable { .. } => "upgrade-available",
        Commands::Version { .. } => "version",
        Commands::Config { .. } => "config",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FixtureRoot, MockRunner, add_marker};

    #[tokio::test]
    async fn test_dispatch_install_through_mock_runner() {
        let fixture = FixtureRoot::new();
        let root = fixture.root().to_path_buf();
        let runner = MockRunner::new().respond_with(" install ", 0, "", move |_| {
            add_marker(&root, "vim-9.0.2189-x86_64-1");
        });
        let manager = SlackpkgManager::with_runner(runner.clone(), fixture.settings());
        let ctx = CliContext {
            quiet: true,
            ..CliContext::default()
        };

        dispatch(
            &ctx,
            &manager,
            Commands::Install {
                packages: vec!["vim".into()],
                sources: vec![],
                refresh: false,
                reinstall: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(runner.count("install vim"), 1);
        assert_eq!(manager.version(&["vim".to_string()]).unwrap()["vim"], "9.0.2189-1");
    }

    #[tokio::test]
    async fn test_dispatch_install_without_targets_fails() {
        let fixture = FixtureRoot::new();
        let manager = SlackpkgManager::with_runner(MockRunner::new(), fixture.settings());
        let result = dispatch(
            &CliContext::default(),
            &manager,
            Commands::Install {
                packages: vec![],
                sources: vec![],
                refresh: false,
                reinstall: false,
            },
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_list_upgrades_honours_no_refresh() {
        let fixture = FixtureRoot::new();
        let runner = MockRunner::new();
        let manager = SlackpkgManager::with_runner(runner.clone(), fixture.settings());
        let ctx = CliContext {
            quiet: true,
            ..CliContext::default()
        };

        dispatch(&ctx, &manager, Commands::ListUpgrades { no_refresh: true })
            .await
            .unwrap();
        assert_eq!(runner.count("check-updates"), 0);

        dispatch(&ctx, &manager, Commands::ListUpgrades { no_refresh: false })
            .await
            .unwrap();
        assert_eq!(runner.count("check-updates"), 1);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(command_name(&Commands::Refresh), "refresh");
        assert_eq!(
            command_name(&Commands::Remove {
                packages: vec!["vim".into()]
            }),
            "remove"
        );
    }
}
