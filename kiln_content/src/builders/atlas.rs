use std::path::{Path, PathBuf};

use kiln_shared::log::{info, trace};

use super::BuildContext;
use crate::{
    converter::{atlas_flags, Invocation, Tool},
    naming::atlas_output_path,
    partition::{partition_by_tags, FileGroup},
    report::BuildReport,
    staging::stage_group,
    walker::{ensure_directory, leaf_directories},
    Result,
};

pub const ATLAS_SOURCE_EXTENSION: &str = "png";
pub const ATLAS_OUTPUT_EXTENSION: &str = ".csatlas";

/// Packs the pngs of every leaf directory into atlases, one per resource tag.
///
/// `GUI/Image.high.png`, `GUI/Other.high.png` and `GUI/Plain.png` end up in
/// `GUI/GUI.high.csatlas` and `GUI/GUI.csatlas`.
pub fn build_atlases(context: &BuildContext, input_root: &Path, output_root: &Path) -> BuildReport {
    info!("Building atlases from {input_root:?} into {output_root:?}");
    let staging_root = context.staging_root();
    let mut report = BuildReport::default();
    for directory in leaf_directories(input_root, ATLAS_SOURCE_EXTENSION) {
        let output_directory = output_root.join(&directory.relative_path);
        if let Err(err) = ensure_directory(&output_directory) {
            report.record(&directory.path, Err(err));
            continue;
        }

        let groups = partition_by_tags(&directory.files);
        trace!("Directory {:?} has {} tag groups", directory.path, groups.len());
        for group in &groups {
            let result = build_atlas(context, group, &output_directory, &staging_root);
            report.record(&directory.path, result);
        }
    }
    report
}

fn build_atlas(context: &BuildContext, group: &FileGroup, output_directory: &Path, staging_root: &Path) -> Result<PathBuf> {
    let output = atlas_output_path(output_directory, &group.tags, ATLAS_OUTPUT_EXTENSION)?;
    let staging_directory = stage_group(group, staging_root)?;

    info!("Building atlas: {output:?} from {} images", group.files.len());
    let invocation =
        Invocation::new(Tool::Atlas, staging_directory.path(), &output).with_flags(atlas_flags(&group.tags, &context.config.atlas));
    context.converter.convert(&invocation)?;
    Ok(output)
}
