//! Readers for the on-disk package databases
//!
//! - `var/log/packages`: one marker file per installed package, named
//!   `name-version-arch-build`
//! - slackpkg's `pkglist`: one row per available package,
//!   `repo name version arch build fullname dir ext`

use std::fs;
use std::path::Path;

use crate::core::paths::PACKAGE_LOG_DIR;
use crate::core::{AvailablePackage, InstalledSet, PackageRecord, Result, SlackError};

/// Scan the marker directory below `root`
pub fn scan_installed(root: &Path) -> Result<InstalledSet> {
    let dir = root.join(PACKAGE_LOG_DIR);
    let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));

    let entries =
        glob::glob(&pattern).map_err(|e| SlackError::Other(format!("Bad glob {pattern}: {e}")))?;

    let mut installed = InstalledSet::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Skipping unreadable package marker: {e}");
                continue;
            }
        };
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match PackageRecord::parse(file_name) {
            Ok(record) => installed.add(&record.name, &record.full_version()),
            Err(_) => tracing::warn!("Skipping malformed package marker {}", path.display()),
        }
    }

    Ok(installed)
}

/// Read and parse slackpkg's pkglist
pub fn read_pkglist(path: &Path) -> Result<Vec<AvailablePackage>> {
    let content = fs::read_to_string(path).map_err(|e| {
        SlackError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {e}", path.display()),
        ))
    })?;
    Ok(parse_pkglist(&content))
}

/// Parse pkglist rows, skipping lines that do not have all eight fields
pub fn parse_pkglist(content: &str) -> Vec<AvailablePackage> {
    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [repo, name, version, arch, build, _full, dir, ext] = fields.as_slice() else {
                if !line.trim().is_empty() {
                    tracing::debug!("Ignoring pkglist line: {line}");
                }
                return None;
            };
            Some(AvailablePackage {
                repo: (*repo).to_string(),
                record: PackageRecord {
                    name: (*name).to_string(),
                    version: (*version).to_string(),
                    arch: (*arch).to_string(),
                    build: (*build).to_string(),
                },
                location: (*dir).to_string(),
                extension: (*ext).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FixtureRoot;

    #[test]
    fn test_scan_installed_reads_markers() {
        let fixture = FixtureRoot::new();
        fixture
            .add_installed("bash-5.1.016-x86_64-1")
            .add_installed("xf86-input-libinput-1.2.1-x86_64-1")
            .add_installed("kernel-generic-5.15.19-x86_64-2")
            .add_installed("kernel-generic-5.15.145-x86_64-1")
            .add_installed("README");

        let installed = scan_installed(fixture.root()).unwrap();
        assert_eq!(installed.len(), 3);
        assert_eq!(installed.version_string("bash"), "5.1.016-1");
        assert_eq!(installed.version_string("xf86-input-libinput"), "1.2.1-1");
        assert_eq!(
            installed.versions("kernel-generic").unwrap(),
            ["5.15.145-1".to_string(), "5.15.19-2".to_string()]
        );
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_installed(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_pkglist() {
        let rows = parse_pkglist(
            "slackware64 aaa_base 15.0 x86_64 3 aaa_base-15.0-x86_64-3 ./slackware64/a txz\n\
             patches bash 5.1.016 x86_64 2_slack15.0 bash-5.1.016-x86_64-2_slack15.0 ./patches/packages txz\n\
             \n\
             garbage line\n",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].repo, "slackware64");
        assert_eq!(rows[0].record.full_version(), "15.0-3");
        assert_eq!(rows[1].record.name, "bash");
        assert_eq!(rows[1].location, "./patches/packages");
        assert_eq!(rows[1].extension, "txz");
    }

    #[test]
    fn test_read_missing_pkglist_is_an_error() {
        assert!(read_pkglist(Path::new("/nonexistent/pkglist")).is_err());
    }
}
