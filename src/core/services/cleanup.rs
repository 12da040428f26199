//! Post-move removal of emptied source directories.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::core::logging::LOG_TARGET;

/// Removes every directory under `root` that is now empty.
///
/// The walk is contents-first, so a parent emptied by the removal of its
/// children falls in the same pass. Directories that still hold anything
/// are left alone, and so is `root` itself. Returns the number of
/// directories removed.
pub fn remove_empty_dirs(root: &Path) -> usize {
    let mut removed = 0;

    for entry in WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if !dir_is_empty(path) {
            continue;
        }

        match fs::remove_dir(path) {
            Ok(()) => {
                debug!(target: LOG_TARGET, "Removed empty directory {}", path.display());
                removed += 1;
            }
            Err(err) => {
                warn!(
                    target: LOG_TARGET,
                    "Could not remove {}: {}",
                    path.display(),
                    err
                );
            }
        }
    }

    removed
}

fn dir_is_empty(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
