use std::{
    fs,
    path::{Path, PathBuf},
};

use kiln_shared::{
    log::{info, warn},
    walkdir::WalkDir,
};

use crate::{report::BuildReport, walker::ensure_directory, Error, Result};

/// Copies music and sound effects as they are. Audio needs no conversion.
pub fn build_audio(input_root: &Path, output_root: &Path) -> BuildReport {
    info!("Copying audio from {input_root:?} into {output_root:?}");
    let mut report = BuildReport::default();
    if !input_root.is_dir() {
        warn!("Input directory {input_root:?} does not exist, nothing to copy");
        return report;
    }

    for entry in WalkDir::new(input_root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_owned).unwrap_or_else(|| input_root.to_owned());
                report.record(&path, Err(Error::IoError(err.into())));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let result = copy_file(entry.path(), input_root, output_root);
        report.record(entry.path(), result);
    }
    report
}

fn copy_file(file: &Path, input_root: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative_path = file.strip_prefix(input_root).map_err(|_| Error::InvalidPath(file.to_owned()))?;
    let output = output_root.join(relative_path);
    if let Some(parent) = output.parent() {
        ensure_directory(parent)?;
    }
    fs::copy(file, &output)?;
    Ok(output)
}
