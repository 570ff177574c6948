//! slackpm settings and configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::{SlackError, paths};

/// slackpm configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filesystem root holding `var/log/packages`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// slackpkg's list of available packages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkglist: Option<PathBuf>,

    /// Where remote package files are downloaded to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Refresh the repository metadata before listing upgrades
    pub refresh_before_list_upgrades: bool,

    /// Refresh the repository metadata before looking up latest versions
    pub refresh_before_latest_version: bool,

    /// Locations of the Slackware package tools
    pub binaries: BinarySettings,
}

/// Paths of the external package tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarySettings {
    pub slackpkg: PathBuf,
    pub installpkg: PathBuf,
    pub upgradepkg: PathBuf,
    pub removepkg: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            pkglist: None,
            cache_dir: None,
            refresh_before_list_upgrades: true,
            refresh_before_latest_version: true,
            binaries: BinarySettings::default(),
        }
    }
}

impl Default for BinarySettings {
    fn default() -> Self {
        Self {
            slackpkg: PathBuf::from("/usr/sbin/slackpkg"),
            installpkg: PathBuf::from("/sbin/installpkg"),
            upgradepkg: PathBuf::from("/sbin/upgradepkg"),
            removepkg: PathBuf::from("/sbin/removepkg"),
        }
    }
}

/// Keys accepted by [`Settings::get`] and [`Settings::set`]
pub const KEYS: &[&str] = &[
    "root",
    "pkglist",
    "cache_dir",
    "refresh_before_list_upgrades",
    "refresh_before_latest_version",
    "binaries.slackpkg",
    "binaries.installpkg",
    "binaries.upgradepkg",
    "binaries.removepkg",
];

impl Settings {
    /// Load settings from config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SlackError::Config(format!("invalid config.toml: {e}")).into())
    }

    /// Save settings to config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Filesystem root; an unset key falls back to `SLACKPM_ROOT` or `/`
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(paths::system_root)
    }

    #[must_use]
    pub fn pkglist(&self) -> PathBuf {
        self.pkglist.clone().unwrap_or_else(paths::pkglist_path)
    }

    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(paths::cache_dir)
    }

    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_dir().join("config.toml")
    }

    /// Read a single setting as a string
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "root" => self.root().display().to_string(),
            "pkglist" => self.pkglist().display().to_string(),
            "cache_dir" => self.cache_dir().display().to_string(),
            "refresh_before_list_upgrades" => self.refresh_before_list_upgrades.to_string(),
            "refresh_before_latest_version" => self.refresh_before_latest_version.to_string(),
            "binaries.slackpkg" => self.binaries.slackpkg.display().to_string(),
            "binaries.installpkg" => self.binaries.installpkg.display().to_string(),
            "binaries.upgradepkg" => self.binaries.upgradepkg.display().to_string(),
            "binaries.removepkg" => self.binaries.removepkg.display().to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Update a single setting from a string
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "root" => self.root = Some(PathBuf::from(value)),
            "pkglist" => self.pkglist = Some(PathBuf::from(value)),
            "cache_dir" => self.cache_dir = Some(PathBuf::from(value)),
            "refresh_before_list_upgrades" => {
                self.refresh_before_list_upgrades = parse_bool(key, value)?;
            }
            "refresh_before_latest_version" => {
                self.refresh_before_latest_version = parse_bool(key, value)?;
            }
            "binaries.slackpkg" => self.binaries.slackpkg = PathBuf::from(value),
            "binaries.installpkg" => self.binaries.installpkg = PathBuf::from(value),
            "binaries.upgradepkg" => self.binaries.upgradepkg = PathBuf::from(value),
            "binaries.removepkg" => self.binaries.removepkg = PathBuf::from(value),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

/// Error for a key not in [`KEYS`]
pub fn unknown_key(key: &str) -> anyhow::Error {
    SlackError::Config(format!("Unknown config key: {key}")).into()
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SlackError::Config(format!("{key} expects a boolean, got '{value}'")).into()),
    }
}
