//! Privilege checks
//!
//! installpkg, upgradepkg, removepkg and slackpkg all write to the system
//! package database and must run as root.

use super::error::{Result, SlackError};

/// Check if we're running as root
#[must_use]
pub fn is_root() -> bool {
    rustix::process::geteuid().is_root()
}

/// Fail with a permission error unless running as root
pub fn require_root(action: &str) -> Result<()> {
    if is_root() {
        Ok(())
    } else {
        Err(SlackError::PermissionDenied(format!(
            "{action} requires root privileges"
        )))
    }
}
