//! Recursive directory traversal
//!
//! Files are visited depth-first with siblings sorted by name, so the same
//! tree always yields the same order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// A regular file found below the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path as found on disk.
    pub path: PathBuf,
    /// `/`-joined path relative to the walk root.
    pub relative: NormalizedPath,
}

/// Result of walking a directory: the files found plus the entries that
/// could not be read. Unreadable entries do not stop the walk.
#[derive(Debug, Default)]
pub struct Walk {
    pub files: Vec<WalkEntry>,
    pub errors: Vec<Error>,
}

/// Walk `root` recursively and list every regular file below it.
///
/// Fails only when `root` itself is missing or not a directory.
pub fn walk_files(root: &Path) -> Result<Walk> {
    let metadata = std::fs::metadata(root).map_err(|e| Error::io(root, e))?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut walk = Walk::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                walk.errors.push(Error::io(path, e.into()));
                continue;
            }
        };

        // Symlinks to files count as files; symlinked directories are not followed
        if !entry.path().is_file() {
            continue;
        }

        let Some(relative) = NormalizedPath::relative_to(entry.path(), root) else {
            continue;
        };
        walk.files.push(WalkEntry {
            path: entry.into_path(),
            relative,
        });
    }

    tracing::debug!(root = %root.display(), files = walk.files.len(), "walked directory");
    Ok(walk)
}
