//! Shared filesystem paths with test-friendly overrides.

use std::path::PathBuf;

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

fn fallback_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Config directory (default: XDG config dir or ~/.config/slackpm).
#[must_use]
pub fn config_dir() -> PathBuf {
    env_path("SLACKPM_CONFIG_DIR").unwrap_or_else(|| {
        dirs::config_dir()
            .map(|d| d.join("slackpm"))
            .unwrap_or_else(|| fallback_home_dir().join(".config/slackpm"))
    })
}

/// Cache directory for downloaded package files (default: XDG cache dir or ~/.cache/slackpm).
#[must_use]
pub fn cache_dir() -> PathBuf {
    env_path("SLACKPM_CACHE_DIR").unwrap_or_else(|| {
        dirs::cache_dir()
            .map(|d| d.join("slackpm"))
            .unwrap_or_else(|| fallback_home_dir().join(".cache/slackpm"))
    })
}

/// Filesystem root the package database lives under (default: /).
#[must_use]
pub fn system_root() -> PathBuf {
    env_path("SLACKPM_ROOT").unwrap_or_else(|| PathBuf::from("/"))
}

/// Installed-package marker directory relative to a root.
pub const PACKAGE_LOG_DIR: &str = "var/log/packages";

/// slackpkg's list of available packages (default: /var/lib/slackpkg/pkglist).
#[must_use]
pub fn pkglist_path() -> PathBuf {
    env_path("SLACKPM_PKGLIST").unwrap_or_else(|| PathBuf::from("/var/lib/slackpkg/pkglist"))
}

/// os-release file used for distro detection.
#[must_use]
pub fn os_release_path() -> PathBuf {
    env_path("SLACKPM_OS_RELEASE").unwrap_or_else(|| PathBuf::from("/etc/os-release"))
}
