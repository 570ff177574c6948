//! Slackware package manager backend (slackpkg + pkgtools)
//!
//! Repository packages go through `slackpkg`; package files go straight to
//! `installpkg` / `upgradepkg`; removals use `removepkg`. Installed state is
//! read from the marker directory before and after each change and the two
//! snapshots are diffed to report what happened.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::LazyLock;

use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;

use crate::config::Settings;
use crate::core::env::distro::{Distro, detect_distro};
use crate::core::{
    ChangeSet, CommandOutput, CommandRunner, CommandSpec, InstalledSet, PackageRecord, Result,
    SlackError, SystemRunner, TargetKind, TargetRequest, Targets, diff_mappings,
    package_name_from_file, parse_targets,
};
use crate::package_managers::pkgdb;
use crate::package_managers::traits::PackageManager;
use crate::package_managers::types::{InstallRequest, ListOptions, RemoveRequest, UpgradeRequest};

/// `slackpkg check-updates` exit code meaning "new metadata is available"
const UPDATES_AVAILABLE: i32 = 100;
/// slackpkg's generic failure exit code
const SLACKPKG_FAILURE: i32 = 1;

/// Package file lines printed by `slackpkg upgrade-all`
static PACKAGE_FILE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(.*)\.t.z$").expect("static regex is valid")
});

struct CachedListing {
    root: PathBuf,
    installed: InstalledSet,
}

pub struct SlackpkgManager<R = SystemRunner> {
    runner: R,
    settings: Settings,
    cache: Mutex<Option<CachedListing>>,
}

impl SlackpkgManager<SystemRunner> {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(SystemRunner, settings)
    }
}

impl<R: CommandRunner> SlackpkgManager<R> {
    pub fn with_runner(runner: R, settings: Settings) -> Self {
        Self {
            runner,
            settings,
            cache: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Confirm this host can be managed: slackpkg is present and the OS is
    /// Slackware (or declares itself Slackware-like).
    pub fn check_available(&self) -> Result<()> {
        if which::which(&self.settings.binaries.slackpkg).is_err() {
            return Err(SlackError::Unavailable(
                "slackpkg command is missing".to_string(),
            ));
        }

        match detect_distro() {
            Distro::Slackware => Ok(()),
            Distro::Other => Err(SlackError::Unavailable(
                "this OS family is not supported".to_string(),
            )),
            Distro::Unknown => Err(SlackError::Unavailable(
                "could not detect the OS family".to_string(),
            )),
        }
    }

    /// Installed packages: name -> `version-build`
    pub fn list_pkgs(&self, options: &ListOptions) -> Result<InstalledSet> {
        // Removed / purge-desired packages are not tracked by pkgtools
        if options.removed || options.purge_desired {
            return Ok(InstalledSet::new());
        }

        let root = options
            .root
            .clone()
            .unwrap_or_else(|| self.settings.root());

        if options.use_cache
            && let Some(cached) = self.cache.lock().as_ref()
            && cached.root == root
        {
            return Ok(cached.installed.clone());
        }

        let installed = pkgdb::scan_installed(&root)?;
        *self.cache.lock() = Some(CachedListing {
            root,
            installed: installed.clone(),
        });
        Ok(installed)
    }

    /// Fresh listing of the configured root, bypassing the cache
    fn snapshot(&self) -> Result<InstalledSet> {
        self.list_pkgs(&ListOptions::default())
    }

    fn invalidate_cache(&self) {
        *self.cache.lock() = None;
    }

    /// Sync repository metadata.
    ///
    /// `Some(true)` if new metadata was found and fetched, `None` if the
    /// mirrors had nothing new. Failures of either step are collected and
    /// reported together.
    pub async fn refresh_db(&self) -> Result<Option<bool>> {
        let mut errors = Vec::new();

        let check = self.run(self.slackpkg().arg("check-updates")).await?;
        let ret = match check.exit_code {
            UPDATES_AVAILABLE => Some(true),
            SLACKPKG_FAILURE => {
                errors.push(check.stderr);
                Some(false)
            }
            _ => None,
        };

        if ret == Some(true) {
            let update = self.run(self.slackpkg_batch("y", "update")).await?;
            if update.exit_code == SLACKPKG_FAILURE {
                errors.push(update.stderr);
            }
        }

        if errors.is_empty() {
            Ok(ret)
        } else {
            Err(SlackError::RefreshFailed {
                updated: ret,
                errors,
            })
        }
    }

    pub async fn install(&self, request: InstallRequest) -> Result<ChangeSet> {
        let targets = self.resolve_targets(request.targets).await?;
        if targets.is_empty() {
            return Ok(ChangeSet::new());
        }

        if request.refresh {
            self.refresh_db().await?;
        }

        let old = self.snapshot()?;
        let mut errors = Vec::new();

        tracing::debug!("Installing these packages: {:?}", targets.names);
        match targets.kind {
            TargetKind::File => {
                for file in &targets.names {
                    let name = package_name_from_file(file);
                    if !request.reinstall && old.contains(&name) {
                        tracing::debug!("Skipping {name}: Already installed");
                        continue;
                    }
                    tracing::debug!("Installing {name} with {file}");
                    let spec = CommandSpec::new(&self.settings.binaries.installpkg).arg(file);
                    let out = self.run(spec).await?;
                    if !out.success() {
                        errors.push(out.stderr);
                    }
                }
            }
            TargetKind::Repository => {
                let (installed, missing): (Vec<String>, Vec<String>) = targets
                    .names
                    .into_iter()
                    .partition(|name| old.contains(name));

                if !missing.is_empty() {
                    let spec = self.slackpkg_batch("y", "install").args(missing).env("TERSE", "0");
                    self.run_checked(spec, &mut errors).await?;
                }

                if request.reinstall && !installed.is_empty() {
                    let spec = self
                        .slackpkg_batch("y", "reinstall")
                        .args(installed)
                        .env("TERSE", "0");
                    self.run_checked(spec, &mut errors).await?;
                }
            }
        }

        self.finish("Problems encountered installing package(s)", &old, errors)
    }

    pub async fn upgrade(&self, request: UpgradeRequest) -> Result<ChangeSet> {
        let whole_system = request.targets.is_empty();
        let targets = if whole_system {
            Targets::default()
        } else {
            let targets = self.resolve_targets(request.targets).await?;
            if targets.is_empty() {
                return Ok(ChangeSet::new());
            }
            targets
        };

        if request.refresh {
            self.refresh_db().await?;
        }

        let old = self.snapshot()?;
        let mut errors = Vec::new();

        if whole_system {
            tracing::debug!("Upgrading all system packages");
            let spec = self.slackpkg_batch("y", "upgrade-all").env("TERSE", "0");
            self.run_checked(spec, &mut errors).await?;
            return self.finish("Problems encountered upgrading package(s)", &old, errors);
        }

        tracing::debug!("Upgrading these packages: {:?}", targets.names);
        match targets.kind {
            TargetKind::File => {
                for file in &targets.names {
                    let name = package_name_from_file(file);
                    if !old.contains(&name) {
                        tracing::debug!("Skipping {name}: Not installed");
                        continue;
                    }
                    tracing::debug!("Upgrading {name} with {file}");
                    let spec = CommandSpec::new(&self.settings.binaries.upgradepkg).arg(file);
                    let out = self.run(spec).await?;
                    if !out.success() {
                        errors.push(out.stderr);
                    }
                }
            }
            TargetKind::Repository => {
                let to_upgrade: Vec<String> = targets
                    .names
                    .into_iter()
                    .filter(|name| old.contains(name))
                    .collect();

                if !to_upgrade.is_empty() {
                    let spec = self
                        .slackpkg_batch("y", "upgrade")
                        .args(to_upgrade)
                        .env("TERSE", "0");
                    self.run_checked(spec, &mut errors).await?;
                }
            }
        }

        self.finish("Problems encountered upgrading package(s)", &old, errors)
    }

    pub async fn remove(&self, request: RemoveRequest) -> Result<ChangeSet> {
        let packages = request.packages();
        if packages.is_empty() {
            return Ok(ChangeSet::new());
        }

        tracing::debug!("Removing these packages: {packages:?}");

        let old = self.snapshot()?;
        let mut errors = Vec::new();

        for package in &packages {
            if !old.contains(package) {
                continue;
            }
            tracing::debug!("Removing {package}");
            let spec = CommandSpec::new(&self.settings.binaries.removepkg).arg(package);
            let out = self.run(spec).await?;
            if !out.success() {
                errors.push(out.stderr);
            }
        }

        self.finish("Problems encountered removing package(s)", &old, errors)
    }

    /// Packages slackpkg would upgrade: name -> `version-build`
    pub async fn list_upgrades(&self, refresh: bool) -> Result<BTreeMap<String, String>> {
        if refresh {
            self.refresh_db().await?;
        }

        let spec = self.slackpkg_batch("n", "upgrade-all").env("TERSE", "0");
        let out = self.run(spec).await?;
        Ok(parse_upgrade_listing(&out.stdout))
    }

    /// Latest available version of each name, or `""` when the installed
    /// version is already the latest (or the package is unknown).
    pub async fn latest_version(
        &self,
        names: &[String],
        refresh: bool,
    ) -> Result<BTreeMap<String, String>> {
        if names.is_empty() {
            return Ok(BTreeMap::new());
        }

        if refresh {
            self.refresh_db().await?;
        }

        let local = self.list_pkgs(&ListOptions::default())?;
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();

        let mut latest: BTreeMap<String, String> =
            names.iter().map(|n| (n.clone(), String::new())).collect();

        for row in pkgdb::read_pkglist(&self.settings.pkglist())? {
            if !wanted.contains(row.record.name.as_str()) {
                continue;
            }
            let available = row.record.full_version();
            let reported = if local.version_string(&row.record.name) == available {
                String::new()
            } else {
                available
            };
            latest.insert(row.record.name, reported);
        }

        Ok(latest)
    }

    /// Whether a newer version of `name` is available
    pub async fn upgrade_available(&self, name: &str, refresh: bool) -> Result<bool> {
        let latest = self.latest_version(&[name.to_string()], refresh).await?;
        Ok(latest.get(name).is_some_and(|v| !v.is_empty()))
    }

    /// Installed version(s) of each name, `""` when not installed
    pub fn version(&self, names: &[String]) -> Result<BTreeMap<String, String>> {
        let installed = self.list_pkgs(&ListOptions {
            use_cache: true,
            ..ListOptions::default()
        })?;
        Ok(names
            .iter()
            .map(|name| (name.clone(), installed.version_string(name)))
            .collect())
    }

    async fn resolve_targets(&self, request: TargetRequest) -> Result<Targets> {
        parse_targets(&request.normalized(), &self.settings.cache_dir())
            .await
            .map_err(|e| {
                SlackError::command_execution(
                    "Failed to resolve package targets",
                    ChangeSet::new(),
                    vec![e.to_string()],
                )
            })
    }

    fn finish(&self, message: &str, old: &InstalledSet, errors: Vec<String>) -> Result<ChangeSet> {
        self.invalidate_cache();
        let new = self.snapshot()?;
        let changes = diff_mappings(old, &new);

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(SlackError::command_execution(message, changes, errors))
        }
    }

    fn slackpkg(&self) -> CommandSpec {
        CommandSpec::new(&self.settings.binaries.slackpkg)
    }

    fn slackpkg_batch(&self, default_answer: &str, action: &str) -> CommandSpec {
        self.slackpkg()
            .arg("-batch=on")
            .arg(format!("-default_answer={default_answer}"))
            .arg(action)
    }

    async fn run(&self, spec: CommandSpec) -> Result<CommandOutput> {
        self.runner.run(&spec).await
    }

    /// Run a slackpkg command, recording stderr when it exits with the
    /// generic failure code. Other codes (e.g. "nothing to do") are not
    /// failures.
    async fn run_checked(&self, spec: CommandSpec, errors: &mut Vec<String>) -> Result<()> {
        let out = self.run(spec).await?;
        if out.exit_code == SLACKPKG_FAILURE {
            errors.push(out.stderr);
        }
        Ok(())
    }
}

/// Extract `name -> version-build` from `slackpkg upgrade-all` output
pub fn parse_upgrade_listing(stdout: &str) -> BTreeMap<String, String> {
    stdout
        .lines()
        .filter_map(|line| {
            let caps = PACKAGE_FILE_LINE.captures(line.trim())?;
            let token = caps.get(1)?.as_str();
            match PackageRecord::parse(token) {
                Ok(record) => Some((record.name.clone(), record.full_version())),
                Err(_) => {
                    tracing::debug!("Ignoring upgrade line: {line}");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl<R: CommandRunner> PackageManager for SlackpkgManager<R> {
    fn name(&self) -> &'static str {
        "slackpkg"
    }

    async fn list_installed(&self, options: &ListOptions) -> Result<InstalledSet> {
        self.list_pkgs(options)
    }

    async fn refresh(&self) -> Result<Option<bool>> {
        self.refresh_db().await
    }

    async fn install(&self, request: InstallRequest) -> Result<ChangeSet> {
        SlackpkgManager::install(self, request).await
    }

    async fn upgrade(&self, request: UpgradeRequest) -> Result<ChangeSet> {
        SlackpkgManager::upgrade(self, request).await
    }

    async fn remove(&self, request: RemoveRequest) -> Result<ChangeSet> {
        SlackpkgManager::remove(self, request).await
    }

    async fn list_upgrades(&self, refresh: bool) -> Result<BTreeMap<String, String>> {
        SlackpkgManager::list_upgrades(self, refresh).await
    }
}
