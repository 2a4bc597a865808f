use std::path::{Path, PathBuf};

use kiln_shared::log::{error, info, warn};

use crate::Error;

/// An item that was not built.
#[derive(Debug)]
pub struct BuildIssue {
    /// The input file or directory.
    pub source: PathBuf,
    pub error: Error,
}

/// Outcome of a build. Items are never aborted on the first error; every
/// problem ends up in [`BuildReport::skipped`] or [`BuildReport::failed`].
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output files that were produced.
    pub built: Vec<PathBuf>,
    /// Items that were skipped because the input doesn't follow the conventions.
    pub skipped: Vec<BuildIssue>,
    /// Items whose conversion or file operation failed.
    pub failed: Vec<BuildIssue>,
}

impl BuildReport {
    /// Records the result of building `source`.
    pub fn record(&mut self, source: &Path, result: crate::Result<PathBuf>) {
        match result {
            Ok(output) => {
                info!("Built {output:?}");
                self.built.push(output);
            }
            Err(error) if is_soft(&error) => {
                warn!("Skipping {source:?}: {error}");
                self.skipped.push(BuildIssue {
                    source: source.to_owned(),
                    error,
                });
            }
            Err(error) => {
                error!("Failed to build {source:?}: {error}");
                self.failed.push(BuildIssue {
                    source: source.to_owned(),
                    error,
                });
            }
        }
    }

    /// Appends the items of `other`.
    pub fn merge(&mut self, other: BuildReport) {
        self.built.extend(other.built);
        self.skipped.extend(other.skipped);
        self.failed.extend(other.failed);
    }

    /// Whether nothing failed. Skipped items don't count as failures.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Errors caused by inputs that don't follow the naming conventions.
fn is_soft(error: &Error) -> bool {
    matches!(
        error,
        Error::MissingTagContext(_) | Error::MissingSourceFile(_) | Error::StagingCollision { .. }
    )
}
