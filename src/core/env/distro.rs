//! Distro detection helpers

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distro {
    Slackware,
    Other,
    Unknown,
}

pub fn detect_distro() -> Distro {
    detect_distro_from(&paths::os_release_path())
}

/// Detect the distro family from an os-release file
pub fn detect_distro_from(path: &Path) -> Distro {
    let Ok(data) = fs::read_to_string(path) else {
        return Distro::Unknown;
    };
    let map = parse_os_release(&data);

    let id = map.get("ID").map(String::as_str).unwrap_or_default();
    let id_like = map.get("ID_LIKE").map(String::as_str).unwrap_or_default();

    if id.is_empty() {
        Distro::Unknown
    } else if is_like(id, id_like, "slackware") {
        Distro::Slackware
    } else {
        Distro::Other
    }
}

fn is_like(id: &str, id_like: &str, needle: &str) -> bool {
    id == needle
        || id_like
            .split_whitespace()
            .any(|value| value.trim() == needle)
}

fn parse_os_release(contents: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let cleaned = value.trim().trim_matches('"');
            map.insert(key.to_string(), cleaned.to_string());
        }
    }
    map
}
