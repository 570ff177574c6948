//! Core module - shared types, errors, and process plumbing

pub mod diff;
pub mod env;
mod error;
pub mod exec;
pub mod paths;
mod privilege;
pub mod targets;
pub mod testing;
mod types;

pub use diff::diff_mappings;
pub use error::{Result, SlackError, suggest_for_anyhow};
pub use exec::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use privilege::{is_root, require_root};
pub use targets::{TargetKind, TargetRequest, Targets, parse_targets, split_input};
pub use types::*;
