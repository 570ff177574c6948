//! slackpm test infrastructure
//!
//! Runs the real binary against a throwaway system root, with the config
//! directory, pkglist and download cache all redirected into it.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Captured result of one CLI run
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// An isolated Slackware-like root
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("var/log/packages")).unwrap();
        fs::create_dir_all(dir.path().join("var/lib/slackpkg")).unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    pub fn pkglist(&self) -> PathBuf {
        self.root().join("var/lib/slackpkg/pkglist")
    }

    /// Mark a package as installed, e.g. `bash-5.1.016-x86_64-1`
    pub fn installed(&self, token: &str) -> &Self {
        fs::write(
            self.root().join("var/log/packages").join(token),
            b"PACKAGE NAME:\n",
        )
        .unwrap();
        self
    }

    /// Write pkglist rows
    pub fn available(&self, rows: &[&str]) -> &Self {
        fs::write(self.pkglist(), rows.join("\n") + "\n").unwrap();
        self
    }

    /// A `Command` for the slackpm binary bound to this sandbox
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_slackpm"));
        cmd.env("NO_COLOR", "1")
            .env("SLACKPM_ROOT", self.root())
            .env("SLACKPM_PKGLIST", self.pkglist())
            .env("SLACKPM_CACHE_DIR", self.root().join("cache"))
            .env("SLACKPM_CONFIG_DIR", self.config_dir())
            .env("SLACKPM_SKIP_CHECKS", "true")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> CommandResult {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run slackpm");
        CommandResult {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}
