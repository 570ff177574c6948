//! slackpm library - Shared code for the CLI and tests
//!
//! Exposes Slackware's `slackpkg` tool chain (`slackpkg`, `installpkg`,
//! `upgradepkg`, `removepkg`) behind a generic package-manager interface.

// Production-ready clippy configuration
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suspicious)]
// Allow documentation lints - internal code, not public API
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod cli;
pub mod config;
pub mod core;
pub mod package_managers;
