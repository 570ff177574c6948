//! Consistent styling utilities for slackpm CLI output
//!
//! All output should use these helpers for consistent UX.
//! Respects the [NO_COLOR standard](https://no-color.org/).

use std::env;

use owo_colors::OwoColorize;
use supports_color::Stream;

/// Detect if colors should be enabled
#[must_use]
pub fn colors_enabled() -> bool {
    // 1. Check NO_COLOR standard (https://no-color.org/)
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    // 2. Check if SLACKPM_COLORS is explicitly set
    if let Ok(val) = env::var("SLACKPM_COLORS") {
        if val == "never" || val == "0" || val == "false" {
            return false;
        }
        if val == "always" || val == "1" || val == "true" {
            return true;
        }
    }

    // 3. Check terminal capabilities via supports-color crate
    supports_color::on(Stream::Stdout).is_some_and(|level| level.has_basic)
}

/// Check if unicode icons should be used
#[must_use]
pub fn use_unicode() -> bool {
    if let Ok(val) = env::var("SLACKPM_UNICODE") {
        return val != "0" && val != "false";
    }
    colors_enabled()
}

/// Apply color only if colors are enabled
#[inline]
#[must_use]
pub fn maybe_color(text: &str, f: impl Fn(&str) -> String) -> String {
    if colors_enabled() {
        f(text)
    } else {
        text.to_string()
    }
}

/// Get an icon (unicode or ASCII fallback)
#[inline]
#[must_use]
pub fn icon(unicode: &str, ascii: &str) -> String {
    if use_unicode() {
        unicode.to_string()
    } else {
        ascii.to_string()
    }
}

/// Header with arrow prefix (e.g., "==> Installing packages")
#[must_use]
pub fn header(msg: &str) -> String {
    maybe_color(msg, |m| format!("{} {}", "==>".magenta().bold(), m.bold()))
}

/// Success message with checkmark
#[must_use]
pub fn success(msg: &str) -> String {
    maybe_color(msg, |m| format!("{} {}", icon("✓", "OK").green().bold(), m))
}

/// Error message with X
#[must_use]
pub fn error(msg: &str) -> String {
    maybe_color(msg, |m| format!("{} {}", icon("✗", "X").red().bold(), m))
}

/// Info message with i
#[must_use]
pub fn info(msg: &str) -> String {
    maybe_color(msg, |m| format!("{} {}", icon("ℹ", "i").blue().bold(), m))
}

/// Arrow used between old and new versions
#[must_use]
pub fn arrow() -> String {
    maybe_color("->", |_| icon("→", "->").cyan().bold().to_string())
}

/// Dimmed/muted text
#[must_use]
pub fn dim(msg: &str) -> String {
    maybe_color(msg, |m| m.dimmed().to_string())
}

/// Package name formatting
#[must_use]
pub fn package(name: &str) -> String {
    maybe_color(name, |n| n.cyan().bold().to_string())
}

/// Version formatting
#[must_use]
pub fn version(ver: &str) -> String {
    maybe_color(ver, |v| v.green().to_string())
}

/// Count formatting
#[must_use]
pub fn count(n: usize) -> String {
    let s = n.to_string();
    maybe_color(&s, |c| c.yellow().bold().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_disables_styling() {
        temp_env::with_vars(
            [("NO_COLOR", Some("1")), ("SLACKPM_UNICODE", Some("0"))],
            || {
                assert!(!colors_enabled());
                assert_eq!(package("bash"), "bash");
                assert_eq!(success("done"), "done");
                assert_eq!(arrow(), "->");
            },
        );
    }

    #[test]
    #[serial]
    fn test_forced_colors() {
        temp_env::with_vars(
            [("NO_COLOR", None), ("SLACKPM_COLORS", Some("always"))],
            || {
                assert!(colors_enabled());
                assert_ne!(package("bash"), "bash");
            },
        );
    }
}
