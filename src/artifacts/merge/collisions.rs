use crate::artifacts::changes::change::Change;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn latest_per_path<'c>(changes: impl IntoIterator<Item = &'c Change>) -> BTreeMap<&'c Path, &'c Change> {
    changes
        .into_iter()
        .map(|change| (change.path(), change))
        .collect()
}

/// Paths where both sides end with changes that disagree
///
/// Only the last change of each side for a path counts; a path both sides
/// set to the same content, or both removed, is not a collision.
pub fn find_collisions<'c>(
    ours: impl IntoIterator<Item = &'c Change>,
    theirs: impl IntoIterator<Item = &'c Change>,
) -> Vec<PathBuf> {
    let ours = latest_per_path(ours);

    latest_per_path(theirs)
        .into_iter()
        .filter(|(path, incoming)| {
            ours.get(path)
                .is_some_and(|current| incoming.conflicts_with(current))
        })
        .map(|(path, _)| path.to_path_buf())
        .collect()
}
