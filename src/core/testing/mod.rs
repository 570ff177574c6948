//! Test infrastructure shared by unit and integration tests
//!
//! This module provides:
//! - A scripted [`CommandRunner`](crate::core::CommandRunner) that records invocations
//! - Throwaway filesystem roots with installed-package markers and a pkglist

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
