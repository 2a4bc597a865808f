use std::path::{Path, PathBuf};

use kiln_shared::log::info;

use super::{relative_file_path, BuildContext};
use crate::{
    converter::{Invocation, Tool},
    naming::tagged_output_path,
    report::BuildReport,
    walker::{ensure_directory, leaf_directories},
    Error, Result,
};

pub const TEXTURE_SOURCE_EXTENSION: &str = "png";
pub const TEXTURE_OUTPUT_EXTENSION: &str = ".csimage";

/// Converts every png of every leaf directory to a csimage.
///
/// The leaf directory names the variant: `GUI/Med/icon.png` becomes `GUI/icon.med.csimage`.
pub fn build_textures(context: &BuildContext, input_root: &Path, output_root: &Path) -> BuildReport {
    info!("Building textures from {input_root:?} into {output_root:?}");
    let mut report = BuildReport::default();
    for directory in leaf_directories(input_root, TEXTURE_SOURCE_EXTENSION) {
        for file in &directory.files {
            let result = build_texture(context, &directory.relative_path, file, output_root);
            report.record(file, result);
        }
    }
    report
}

fn build_texture(context: &BuildContext, relative_directory: &Path, file: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative_path = relative_file_path(relative_directory, file)?;
    let output = tagged_output_path(&relative_path, output_root, TEXTURE_OUTPUT_EXTENSION)?;
    let output_directory = output.parent().ok_or_else(|| Error::InvalidPath(output.clone()))?;
    ensure_directory(output_directory)?;

    info!("Building texture: {output:?}");
    context.converter.convert(&Invocation::new(Tool::Texture, file, &output))?;
    Ok(output)
}
