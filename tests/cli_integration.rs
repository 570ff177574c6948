//! Integration tests for the slackpm CLI
//!
//! Every test runs the real binary against a sandboxed root; the package
//! tools are either never reached or replaced by small shell scripts.

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::prelude::*;
use common::Sandbox;
use predicates::prelude::*;
use serde_json::json;

fn sandbox_with_packages() -> Sandbox {
    let sandbox = Sandbox::new();
    sandbox
        .installed("bash-5.1.016-x86_64-1")
        .installed("kernel-generic-5.15.19-x86_64-2")
        .installed("kernel-generic-5.15.145-x86_64-1")
        .installed("xf86-input-libinput-1.2.1-x86_64-1");
    sandbox
}

/// Write an executable shell script into the sandbox
fn script(sandbox: &Sandbox, name: &str, body: &str) -> PathBuf {
    let path = sandbox.root().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    let sandbox = Sandbox::new();

    sandbox
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("list-upgrades"))
        .stdout(predicate::str::contains("latest-version"));
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slackpm"));
}

#[test]
fn test_list_json_joins_versions() {
    // ===== ARRANGE =====
    let sandbox = sandbox_with_packages();

    // ===== ACT =====
    let result = sandbox.run(&["list", "--json"]);

    // ===== ASSERT =====
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(
        result.json(),
        json!({
            "bash": "5.1.016-1",
            "kernel-generic": "5.15.145-1,5.15.19-2",
            "xf86-input-libinput": "1.2.1-1",
        })
    );
}

#[test]
fn test_list_json_versions_as_list() {
    let sandbox = sandbox_with_packages();

    let result = sandbox.run(&["list", "--versions-as-list", "--json"]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(
        result.json()["kernel-generic"],
        json!(["5.15.145-1", "5.15.19-2"])
    );
    assert_eq!(result.json()["bash"], json!(["5.1.016-1"]));
}

#[test]
fn test_list_removed_and_purge_desired_are_empty() {
    let sandbox = sandbox_with_packages();

    for flag in ["--removed", "--purge-desired"] {
        let result = sandbox.run(&["list", flag, "--json"]);
        assert!(result.success, "stderr: {}", result.stderr);
        assert_eq!(result.json(), json!({}), "{flag}");
    }
}

#[test]
fn test_list_alternate_root() {
    let sandbox = sandbox_with_packages();
    let other = Sandbox::new();
    other.installed("vim-9.0.2189-x86_64-1");

    let result = sandbox.run(&["list", "--json", "--root", other.root().to_str().unwrap()]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.json(), json!({ "vim": "9.0.2189-1" }));
}

#[test]
fn test_list_human_output() {
    let sandbox = sandbox_with_packages();

    sandbox
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("5.1.016-1"))
        .stdout(predicate::str::contains("3 packages installed"));
}

#[test]
fn test_version_reports_missing_as_empty() {
    let sandbox = sandbox_with_packages();

    let result = sandbox.run(&["version", "bash", "vim", "--json"]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.json(), json!({ "bash": "5.1.016-1", "vim": "" }));
}

#[test]
fn test_latest_version_from_pkglist() {
    // ===== ARRANGE =====
    let sandbox = sandbox_with_packages();
    sandbox.available(&[
        "patches bash 5.1.016 x86_64 2_slack15.0 bash-5.1.016-x86_64-2_slack15.0 ./patches/packages txz",
        "slackware64 xf86-input-libinput 1.2.1 x86_64 1 xf86-input-libinput-1.2.1-x86_64-1 ./slackware64/x txz",
    ]);

    // ===== ACT =====
    let result = sandbox.run(&[
        "latest-version",
        "bash",
        "xf86-input-libinput",
        "nosuchpkg",
        "--no-refresh",
        "--json",
    ]);

    // ===== ASSERT =====
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(
        result.json(),
        json!({
            "bash": "5.1.016-2_slack15.0",
            "nosuchpkg": "",
            "xf86-input-libinput": "",
        })
    );
}

#[test]
fn test_upgrade_available() {
    let sandbox = sandbox_with_packages();
    sandbox.available(&[
        "patches bash 5.1.016 x86_64 2_slack15.0 bash-5.1.016-x86_64-2_slack15.0 ./patches/packages txz",
    ]);

    let bash = sandbox.run(&["upgrade-available", "bash", "--no-refresh", "--json"]);
    assert!(bash.success, "stderr: {}", bash.stderr);
    assert_eq!(bash.json(), json!({ "package": "bash", "available": true }));

    let kernel = sandbox.run(&["upgrade-available", "kernel-generic", "--no-refresh", "--json"]);
    assert!(kernel.success, "stderr: {}", kernel.stderr);
    assert_eq!(kernel.json()["available"], json!(false));
}

#[test]
fn test_latest_version_without_pkglist_fails() {
    let sandbox = sandbox_with_packages();

    sandbox
        .command()
        .args(["latest-version", "bash", "--no-refresh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pkglist"));
}

#[test]
fn test_config_set_then_get() {
    let sandbox = Sandbox::new();

    let set = sandbox.run(&["config", "refresh_before_list_upgrades", "off"]);
    assert!(set.success, "stderr: {}", set.stderr);
    assert!(sandbox.config_dir().join("config.toml").exists());

    let get = sandbox.run(&["config", "refresh_before_list_upgrades", "--json"]);
    assert!(get.success, "stderr: {}", get.stderr);
    assert_eq!(get.json(), json!({ "refresh_before_list_upgrades": "false" }));
}

#[test]
fn test_config_rejects_bad_values() {
    let sandbox = Sandbox::new();

    let unknown = sandbox.run(&["config", "no_such_key"]);
    assert!(!unknown.success);
    assert!(unknown.stderr.contains("Unknown config key"));

    let not_bool = sandbox.run(&["config", "refresh_before_latest_version", "maybe"]);
    assert!(!not_bool.success);
}

#[test]
fn test_remove_not_installed_is_a_no_op() {
    let sandbox = sandbox_with_packages();

    let result = sandbox.run(&["remove", "vim", "--json"]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.json(), json!({ "changes": {} }));
}

#[test]
fn test_remove_reports_changes() {
    // ===== ARRANGE =====
    let sandbox = sandbox_with_packages();
    let removepkg = script(
        &sandbox,
        "removepkg",
        &format!(
            "rm -f {}/var/log/packages/\"$1\"-*",
            sandbox.root().display()
        ),
    );
    let configured = sandbox.run(&["config", "binaries.removepkg", removepkg.to_str().unwrap()]);
    assert!(configured.success, "stderr: {}", configured.stderr);

    // ===== ACT =====
    let result = sandbox.run(&["remove", "bash,vim", "--json"]);

    // ===== ASSERT =====
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(
        result.json(),
        json!({ "changes": { "bash": { "old": "5.1.016-1", "new": "" } } })
    );
    assert!(
        !sandbox
            .root()
            .join("var/log/packages/bash-5.1.016-x86_64-1")
            .exists()
    );
}

#[test]
fn test_failed_removal_exits_non_zero() {
    let sandbox = sandbox_with_packages();
    let removepkg = script(&sandbox, "removepkg", "echo 'removepkg: locked' >&2\nexit 2");
    assert!(
        sandbox
            .run(&["config", "binaries.removepkg", removepkg.to_str().unwrap()])
            .success
    );

    sandbox
        .command()
        .args(["remove", "bash"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Problems encountered removing package(s)"))
        .stderr(predicate::str::contains("removepkg: locked"));
}

#[test]
fn test_failed_removal_json_is_a_single_document() {
    // ===== ARRANGE =====
    let sandbox = sandbox_with_packages();
    let removepkg = script(&sandbox, "removepkg", "echo locked >&2\nexit 2");
    assert!(
        sandbox
            .run(&["config", "binaries.removepkg", removepkg.to_str().unwrap()])
            .success
    );

    // ===== ACT =====
    let result = sandbox.run(&["remove", "bash", "--json"]);

    // ===== ASSERT =====
    assert!(!result.success);
    assert_eq!(result.exit_code, Some(1));
    let report = result.json();
    assert_eq!(report["changes"], json!({}));
    assert_eq!(report["errors"], json!(["locked\n"]));
    assert!(
        report["error"]
            .as_str()
            .unwrap()
            .starts_with("Problems encountered removing package(s)")
    );
    assert!(report["suggestion"].is_string());
}

#[test]
fn test_plain_json_error_has_no_change_fields() {
    let sandbox = Sandbox::new();

    let result = sandbox.run(&["config", "no_such_key", "--json"]);

    assert!(!result.success);
    let report = result.json();
    assert!(report["error"].as_str().unwrap().contains("Unknown config key"));
    assert!(report.get("changes").is_none());
    assert!(report.get("errors").is_none());
}

#[test]
fn test_environment_paths_survive_config_set() {
    // ===== ARRANGE =====
    let sandbox = sandbox_with_packages();
    let other = Sandbox::new();
    other.installed("vim-9.0.2189-x86_64-1");
    assert!(
        sandbox
            .run(&["config", "refresh_before_list_upgrades", "off"])
            .success
    );
    let saved = fs::read_to_string(sandbox.config_dir().join("config.toml")).unwrap();
    assert!(!saved.contains("root"));

    // ===== ACT =====
    let output = sandbox
        .command()
        .env("SLACKPM_ROOT", other.root())
        .args(["list", "--json"])
        .output()
        .unwrap();

    // ===== ASSERT =====
    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed, json!({ "vim": "9.0.2189-1" }));
}

#[test]
fn test_explicit_root_in_config_wins() {
    let sandbox = sandbox_with_packages();
    let other = Sandbox::new();
    other.installed("vim-9.0.2189-x86_64-1");
    assert!(
        sandbox
            .run(&["config", "root", other.root().to_str().unwrap()])
            .success
    );

    let result = sandbox.run(&["list", "--json"]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.json(), json!({ "vim": "9.0.2189-1" }));
}

#[test]
fn test_install_file_already_installed_is_skipped() {
    let sandbox = sandbox_with_packages();
    let file = sandbox.root().join("bash-5.1.016-x86_64-1.txz");
    fs::write(&file, b"").unwrap();

    let result = sandbox.run(&["install", file.to_str().unwrap(), "--json"]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.json(), json!({ "changes": {} }));
}

#[test]
fn test_install_with_installpkg_script() {
    // ===== ARRANGE =====
    let sandbox = sandbox_with_packages();
    let file = sandbox.root().join("vim-9.0.2189-x86_64-1.txz");
    fs::write(&file, b"").unwrap();
    let installpkg = script(
        &sandbox,
        "installpkg",
        &format!(
            "touch {}/var/log/packages/\"$(basename \"$1\" .txz)\"",
            sandbox.root().display()
        ),
    );
    assert!(
        sandbox
            .run(&["config", "binaries.installpkg", installpkg.to_str().unwrap()])
            .success
    );

    // ===== ACT =====
    let result = sandbox.run(&["install", "--source", file.to_str().unwrap(), "--json"]);

    // ===== ASSERT =====
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(
        result.json(),
        json!({ "changes": { "vim": { "old": "", "new": "9.0.2189-1" } } })
    );
}

#[test]
fn test_install_mixing_names_and_files_fails() {
    let sandbox = sandbox_with_packages();
    let file = sandbox.root().join("vim-9.0.2189-x86_64-1.txz");
    fs::write(&file, b"").unwrap();

    sandbox
        .command()
        .args(["install", "bash", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve package targets"));
}

#[test]
fn test_install_missing_local_file_fails() {
    let sandbox = sandbox_with_packages();

    sandbox
        .command()
        .args(["install", "/nonexistent/vim-9.0.2189-x86_64-1.txz"])
        .assert()
        .failure()
        .code(1);
}
