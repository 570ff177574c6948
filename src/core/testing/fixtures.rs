//! Filesystem fixtures: a throwaway system root with a package database

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Settings;
use crate::core::paths::PACKAGE_LOG_DIR;

/// A temporary root containing `var/log/packages`, a slackpkg pkglist and a
/// download cache directory.
pub struct FixtureRoot {
    temp_dir: TempDir,
}

impl FixtureRoot {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(PACKAGE_LOG_DIR)).unwrap();
        fs::create_dir_all(temp_dir.path().join("cache")).unwrap();
        Self { temp_dir }
    }

    /// Root directory of the fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn pkglist_path(&self) -> PathBuf {
        self.root().join("var/lib/slackpkg/pkglist")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root().join("cache")
    }

    /// Settings pointing every path at this fixture
    pub fn settings(&self) -> Settings {
        Settings {
            root: Some(self.root().to_path_buf()),
            pkglist: Some(self.pkglist_path()),
            cache_dir: Some(self.cache_dir()),
            ..Settings::default()
        }
    }

    /// Drop an installed-package marker, e.g. `bash-5.1.016-x86_64-1`
    pub fn add_installed(&self, token: &str) -> &Self {
        add_marker(self.root(), token);
        self
    }

    /// Write the pkglist file from full rows
    pub fn write_pkglist(&self, rows: &[&str]) -> &Self {
        let path = self.pkglist_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rows.join("\n") + "\n").unwrap();
        self
    }

    /// Create an (empty) package file in the cache dir and return its path
    pub fn package_file(&self, file_name: &str) -> PathBuf {
        let path = self.cache_dir().join(file_name);
        fs::write(&path, b"").unwrap();
        path
    }
}

impl Default for FixtureRoot {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a marker under `root`; usable from mock runner effects
pub fn add_marker(root: &Path, token: &str) {
    fs::write(root.join(PACKAGE_LOG_DIR).join(token), b"PACKAGE NAME:\n").unwrap();
}

/// Remove all markers for `name` under `root`; usable from mock runner effects
pub fn remove_markers(root: &Path, name: &str) {
    let dir = root.join(PACKAGE_LOG_DIR);
    for entry in fs::read_dir(dir).unwrap().flatten() {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.rsplitn(4, '-').nth(3) == Some(name) {
            fs::remove_file(entry.path()).unwrap();
        }
    }
}
