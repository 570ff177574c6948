//! Before/after comparison of installed package sets

use std::collections::BTreeSet;

use super::types::{ChangeSet, InstalledSet, VersionChange};

/// Compare two installed sets. Every package whose (comma-joined) version
/// string differs is reported, with `""` standing in for the missing side.
#[must_use]
pub fn diff_mappings(old: &InstalledSet, new: &InstalledSet) -> ChangeSet {
    let names: BTreeSet<&String> = old
        .iter()
        .chain(new.iter())
        .map(|(name, _)| name)
        .collect();

    names
        .into_iter()
        .filter_map(|name| {
            let before = old.version_string(name);
            let after = new.version_string(name);
            (before != after).then(|| {
                (
                    name.clone(),
                    VersionChange {
                        old: before,
                        new: after,
                    },
                )
            })
        })
        .collect()
}
