//! JSON output formatting for CLI commands

use serde::Serialize;

use crate::core::ChangeSet;

/// Result of a mutating command, successful or not
#[derive(Serialize)]
pub struct ChangeReport<'a> {
    pub changes: &'a ChangeSet,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub errors: &'a [String],
}

#[derive(Serialize)]
pub struct RefreshResult {
    /// `true`: metadata updated, `null`: nothing new
    pub updated: Option<bool>,
}

#[derive(Serialize)]
pub struct UpgradeAvailable<'a> {
    pub package: &'a str,
    pub available: bool,
}

/// A failed command. Mutating commands also carry what did change and
/// the collected tool errors.
#[derive(Serialize)]
pub struct ErrorReport<'a> {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<&'a ChangeSet>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub errors: &'a [String],
}

pub fn print_json<T: Serialize>(data: &T) {
    if let Ok(json) = serde_json::to_string_pretty(data) {
        println!("{json}");
    }
}
