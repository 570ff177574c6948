//! Common utilities for package operations

use std::collections::BTreeMap;

use crate::cli::json_output::{ChangeReport, print_json};
use crate::cli::{CliContext, style};
use crate::core::{ChangeSet, TargetRequest, is_package_source};

/// Sort positional arguments into repository names and package files,
/// merging in any explicit `--source` values.
pub fn split_targets(packages: &[String], sources: &[String]) -> TargetRequest {
    let (files, names): (Vec<String>, Vec<String>) = packages
        .iter()
        .cloned()
        .partition(|p| is_package_source(p));

    TargetRequest {
        name: None,
        pkgs: names,
        sources: files.into_iter().chain(sources.iter().cloned()).collect(),
    }
}

/// Print a change set (and any errors collected alongside it)
pub fn print_changes(ctx: &CliContext, changes: &ChangeSet, errors: &[String]) {
    if ctx.json {
        print_json(&ChangeReport { changes, errors });
        return;
    }
    if ctx.quiet {
        return;
    }

    if changes.is_empty() {
        println!("{}", style::info("No changes"));
        return;
    }

    println!(
        "{}",
        style::header(&format!("{} package(s) changed", style::count(changes.len())))
    );
    for (name, change) in changes {
        println!(
            "  {} {} {} {}",
            style::package(name),
            style::dim(or_none(&change.old)),
            style::arrow(),
            style::version(or_none(&change.new))
        );
    }
}

/// Print a name -> version map
pub fn print_versions(ctx: &CliContext, versions: &BTreeMap<String, String>, empty_msg: &str) {
    if ctx.json {
        print_json(versions);
        return;
    }
    if ctx.quiet {
        return;
    }

    if versions.is_empty() {
        println!("{}", style::info(empty_msg));
        return;
    }

    let width = versions.keys().map(String::len).max().unwrap_or(0);
    for (name, version) in versions {
        println!(
            "{}  {}",
            style::package(&format!("{name:<width$}")),
            style::version(or_none(version))
        );
    }
}

fn or_none(version: &str) -> &str {
    if version.is_empty() { "-" } else { version }
}
