use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicU64, Ordering},
};

use kiln_shared::log::{error, trace};

use crate::{common::extract_file_name_from_path, partition::FileGroup, tags::strip_tags, Error, Result};

pub const STAGING_DIRECTORY_PREFIX: &str = "_kiln-staging-";

static NEXT_STAGING_ID: AtomicU64 = AtomicU64::new(0);

/// A temporary directory that is owned by one build step.
///
/// The directory and everything in it is deleted when the [`StagingDirectory`]
/// is dropped, so it is released on every exit path of the owning scope.
#[derive(Debug)]
pub struct StagingDirectory {
    path: PathBuf,
}

impl StagingDirectory {
    /// Creates a new uniquely named directory in `staging_root`.
    ///
    /// The name consists of [`STAGING_DIRECTORY_PREFIX`], the process ID and a
    /// counter that is incremented for every directory created by the process.
    pub fn create(staging_root: &Path) -> Result<Self> {
        fs::create_dir_all(staging_root)?;
        let id = NEXT_STAGING_ID.fetch_add(1, Ordering::Relaxed);
        let path = staging_root.join(format!("{STAGING_DIRECTORY_PREFIX}{}-{id}", process::id()));
        fs::create_dir(&path)?;
        trace!("Created staging directory {path:?}");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDirectory {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => trace!("Removed staging directory {:?}", self.path),
            Err(err) => error!("Failed to remove staging directory {:?}: {err}", self.path),
        }
    }
}

/// Copies the files of `group` into a new [`StagingDirectory`] under their tag-stripped names.
///
/// The source files are left untouched.
///
/// # Errors
///
/// [`Error::StagingCollision`] if two files of the group have the same name
/// after stripping the tags. The staging directory is removed in that case.
pub fn stage_group(group: &FileGroup, staging_root: &Path) -> Result<StagingDirectory> {
    let staging_directory = StagingDirectory::create(staging_root)?;
    let mut staged = HashMap::<String, &Path>::new();
    for file in &group.files {
        let staged_name = strip_tags(&extract_file_name_from_path(file)?);
        if let Some(first) = staged.get(&staged_name) {
            return Err(Error::StagingCollision {
                first: first.to_path_buf(),
                second: file.clone(),
                staged_name,
            });
        }
        fs::copy(file, staging_directory.path().join(&staged_name))?;
        staged.insert(staged_name, file);
    }
    Ok(staging_directory)
}
