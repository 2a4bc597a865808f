use std::{
    fs,
    path::{Path, PathBuf},
};

use kiln_shared::{
    log::{info, trace, warn},
    pathdiff,
    walkdir::WalkDir,
};

use crate::{common::has_extension, Result};

/// Which directories of an input tree are build units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only directories without subdirectories.
    Leaves,
    /// Every directory that contains matching files.
    All,
}

/// An input directory that is built as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDirectory {
    /// Absolute or root-prefixed path of the directory.
    pub path: PathBuf,
    /// Path of the directory relative to the walked root. Empty for the root itself.
    pub relative_path: PathBuf,
    /// Files of the directory with the requested extension, sorted by file name.
    pub files: Vec<PathBuf>,
}

/// Returns the leaf directories below `root` that contain at least one file with `extension`.
pub fn leaf_directories(root: &Path, extension: &str) -> Vec<ContentDirectory> {
    content_directories(root, extension, Scope::Leaves)
}

/// Returns the directories below `root` in `scope` that contain at least one file with `extension`.
///
/// The walk is depth-first and sorted by file name. A missing `root` yields no
/// directories. Unreadable entries are logged and skipped.
pub fn content_directories(root: &Path, extension: &str, scope: Scope) -> Vec<ContentDirectory> {
    if !root.is_dir() {
        warn!("Input directory {root:?} does not exist, nothing to build");
        return Vec::new();
    }

    let mut directories = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Failed to read directory entry in {root:?}: {err}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let (has_subdirectories, mut files) = match read_directory(entry.path(), extension) {
            Ok(content) => content,
            Err(err) => {
                warn!("Failed to read directory {:?}: {err}", entry.path());
                continue;
            }
        };
        if has_subdirectories && scope == Scope::Leaves {
            trace!("Directory {:?} has subdirectories and is not a build unit", entry.path());
            continue;
        }
        if files.is_empty() {
            trace!("Directory {:?} contains no '{extension}' files", entry.path());
            continue;
        }
        files.sort();

        let Some(relative_path) = pathdiff::diff_paths(entry.path(), root) else {
            warn!("Failed to get relative path of {:?} relative to {root:?}", entry.path());
            continue;
        };
        directories.push(ContentDirectory {
            path: entry.path().to_owned(),
            relative_path,
            files,
        });
    }
    directories
}

/// Whether the directory has subdirectories and the files in it with the given extension.
fn read_directory(path: &Path, extension: &str) -> Result<(bool, Vec<PathBuf>)> {
    let mut has_subdirectories = false;
    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        // Follows symlinks.
        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("Failed to read {:?}: {err}", entry.path());
                continue;
            }
        };
        if metadata.is_dir() {
            has_subdirectories = true;
        } else if metadata.is_file() && has_extension(entry.path(), extension) {
            files.push(entry.path());
        }
    }
    Ok((has_subdirectories, files))
}

/// Creates the directory and all its parents. Does nothing if it already exists.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        info!("Creating output directory {path:?}");
        fs::create_dir_all(path)?;
    }
    Ok(())
}
