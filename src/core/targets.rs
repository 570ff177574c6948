//! Resolution of user-supplied install/upgrade targets
//!
//! A request names either repository packages (`name` / `pkgs`) or package
//! files (`sources`). Remote sources are fetched into the cache directory so
//! that `installpkg` / `upgradepkg` always receive a local path.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::{Result, SlackError};
use super::types::{basename, is_package_source};

/// What a list of targets refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Package names resolved by slackpkg against its mirrors
    #[default]
    Repository,
    /// Local package files handed to installpkg / upgradepkg
    File,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repository => write!(f, "repository"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Raw targets as supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct TargetRequest {
    pub name: Option<String>,
    pub pkgs: Vec<String>,
    pub sources: Vec<String>,
}

impl TargetRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn packages<I, S>(pkgs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pkgs: pkgs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A `name` that is an absolute path or URL is treated as a single source
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let Some(name) = self.name.take_if(|name| is_package_source(name)) {
            self.sources = vec![name];
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty)
            && self.pkgs.is_empty()
            && self.sources.is_empty()
    }
}

/// Resolved targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub names: Vec<String>,
    pub kind: TargetKind,
}

impl Targets {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Turn a request into a target list and its kind.
///
/// `pkgs` and `sources` are mutually exclusive. Sources that are URLs are
/// downloaded into `cache_dir`; local sources must exist.
pub async fn parse_targets(request: &TargetRequest, cache_dir: &Path) -> Result<Targets> {
    if !request.pkgs.is_empty() && !request.sources.is_empty() {
        return Err(SlackError::InvalidTargets(
            "only one of pkgs and sources may be given".to_string(),
        ));
    }

    if !request.sources.is_empty() {
        let mut names = Vec::with_capacity(request.sources.len());
        for source in &request.sources {
            let local = resolve_source(source, cache_dir).await?;
            names.push(local.to_string_lossy().into_owned());
        }
        return Ok(Targets {
            names: dedup(names),
            kind: TargetKind::File,
        });
    }

    let names = if request.pkgs.is_empty() {
        request
            .name
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect()
    } else {
        request.pkgs.clone()
    };

    Ok(Targets {
        names: dedup(names),
        kind: TargetKind::Repository,
    })
}

/// Split a comma-separated package list, dropping blanks
#[must_use]
pub fn split_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

async fn resolve_source(source: &str, cache_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = source.strip_prefix("file://") {
        return resolve_local(Path::new(path));
    }

    match source.split_once("://") {
        Some(("http" | "https", _)) => download(source, cache_dir).await,
        Some((scheme, _)) => Err(SlackError::InvalidTargets(format!(
            "unsupported source scheme '{scheme}' in {source}"
        ))),
        None => resolve_local(Path::new(source)),
    }
}

fn resolve_local(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(SlackError::InvalidTargets(format!(
            "package file {} does not exist",
            path.display()
        )))
    }
}

async fn download(url: &str, cache_dir: &Path) -> Result<PathBuf> {
    let file_name = basename(url);
    if file_name.is_empty() {
        return Err(SlackError::InvalidTargets(format!(
            "cannot derive a file name from {url}"
        )));
    }

    tokio::fs::create_dir_all(cache_dir).await?;
    let dest = cache_dir.join(file_name);

    tracing::debug!("Downloading {url} to {}", dest.display());
    let bytes = reqwest::get(url).await?.error_for_status()?.bytes().await?;
    tokio::fs::write(&dest, &bytes).await?;

    Ok(dest)
}
