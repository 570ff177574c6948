//! Common types used throughout slackpm

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{Result, SlackError};

/// Package file extensions understood by `installpkg` / `upgradepkg`
pub const PACKAGE_EXTENSIONS: &[&str] = &["tgz", "txz", "tbz", "tlz"];

/// A Slackware package identity, `name-version-arch-build`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub arch: String,
    pub build: String,
}

impl PackageRecord {
    /// Parse a `name-version-arch-build` token. The name itself may contain
    /// dashes, so only the last three fields are split off.
    pub fn parse(token: &str) -> Result<Self> {
        let mut fields = token.rsplitn(4, '-');
        let build = fields.next();
        let arch = fields.next();
        let version = fields.next();
        let name = fields.next();

        match (name, version, arch, build) {
            (Some(name), Some(version), Some(arch), Some(build)) if !name.is_empty() => Ok(Self {
                name: name.to_string(),
                version: version.to_string(),
                arch: arch.to_string(),
                build: build.to_string(),
            }),
            _ => Err(SlackError::InvalidPackageName(token.to_string())),
        }
    }

    /// Parse a package file path such as
    /// `/tmp/foo-1.2.3-x86_64-1.txz` or `https://host/foo-1.2.3-x86_64-1_SBo.tgz`.
    pub fn from_package_file(path: &str) -> Result<Self> {
        let base = basename(path);
        Self::parse(strip_package_extension(base))
    }

    /// The version string slackpm reports: `version-build`
    #[must_use]
    pub fn full_version(&self) -> String {
        format!("{}-{}", self.version, self.build)
    }
}

impl std::fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}-{}", self.name, self.version, self.arch, self.build)
    }
}

/// Last path component of a local path or URL
#[must_use]
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Remove a trailing `.tgz`/`.txz`/`.tbz`/`.tlz`, if any
#[must_use]
pub fn strip_package_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if PACKAGE_EXTENSIONS.contains(&ext) => stem,
        _ => file_name,
    }
}

/// Package name derived from a package file path, falling back to the
/// basename when the file does not follow the naming convention.
#[must_use]
pub fn package_name_from_file(path: &str) -> String {
    PackageRecord::from_package_file(path)
        .map(|record| record.name)
        .unwrap_or_else(|_| basename(path).to_string())
}

/// Installed packages: name -> one or more `version-build` strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstalledSet(BTreeMap<String, Vec<String>>);

impl InstalledSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a version for a package, keeping the version list sorted and
    /// free of duplicates.
    pub fn add(&mut self, name: &str, version: &str) {
        let versions = self.0.entry(name.to_string()).or_default();
        if let Err(pos) = versions.binary_search_by(|v| v.as_str().cmp(version)) {
            versions.insert(pos, version.to_string());
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn versions(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Installed version(s) of `name` joined with `,`, or `""` when absent
    #[must_use]
    pub fn version_string(&self, name: &str) -> String {
        self.0.get(name).map(|v| v.join(",")).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Collapse multiple versions into one comma-joined string per package
    #[must_use]
    pub fn stringified(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(name, versions)| (name.clone(), versions.join(",")))
            .collect()
    }

    /// Render in the requested shape
    #[must_use]
    pub fn render(&self, versions_as_list: bool) -> Versions {
        if versions_as_list {
            Versions::List(self.0.clone())
        } else {
            Versions::Joined(self.stringified())
        }
    }
}

/// Installed set rendered for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Versions {
    List(BTreeMap<String, Vec<String>>),
    Joined(BTreeMap<String, String>),
}

/// Before/after versions of one package; `""` means absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    pub old: String,
    pub new: String,
}

/// Per-package changes produced by a mutating operation
pub type ChangeSet = BTreeMap<String, VersionChange>;

/// One row of the slackpkg `pkglist` file:
/// `repo name version arch build fullname dir ext`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailablePackage {
    pub repo: String,
    pub record: PackageRecord,
    pub location: String,
    pub extension: String,
}

/// Whether a string names a package file rather than a repository package
#[must_use]
pub fn is_package_source(name: &str) -> bool {
    name.starts_with('/') || name.contains("://")
}
