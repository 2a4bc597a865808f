use std::path::{Path, PathBuf};

use kiln_shared::log::info;

use super::{relative_file_path, BuildContext};
use crate::{
    converter::{model_flags, Invocation, Tool},
    naming::mirrored_output_path,
    report::BuildReport,
    tags::TagString,
    walker::{content_directories, ensure_directory, Scope},
    Result,
};

pub const MODEL_SOURCE_EXTENSION: &str = "dae";
pub const MODEL_OUTPUT_EXTENSION: &str = ".csmodel";

/// Converts every dae below `input_root` to a csmodel at the same relative location.
pub fn build_models(context: &BuildContext, input_root: &Path, output_root: &Path) -> BuildReport {
    info!("Building models from {input_root:?} into {output_root:?}");
    let mut report = BuildReport::default();
    for directory in content_directories(input_root, MODEL_SOURCE_EXTENSION, Scope::All) {
        let output_directory = output_root.join(&directory.relative_path);
        if let Err(err) = ensure_directory(&output_directory) {
            report.record(&directory.path, Err(err));
            continue;
        }
        for file in &directory.files {
            let result = build_model(context, &directory.relative_path, file, output_root);
            report.record(file, result);
        }
    }
    report
}

fn build_model(context: &BuildContext, relative_directory: &Path, file: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative_path = relative_file_path(relative_directory, file)?;
    let output = mirrored_output_path(&relative_path, output_root, &TagString::empty(), MODEL_OUTPUT_EXTENSION)?;

    info!("Building model: {output:?}");
    let invocation = Invocation::new(Tool::Model, file, &output).with_flags(model_flags());
    context.converter.convert(&invocation)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use kiln_shared::function_name;
    use kiln_test::{create_file, list_files, setup_logger, test_root};

    use super::*;
    use crate::{
        testing::{flags, RecordingConverter},
        PipelineConfig,
    };

    #[test]
    fn models_mirror_the_input_tree() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Models");
        let output = root.path().join("out/Models");
        create_file(&input, "Paddle.dae", "");
        create_file(&input, "Arena/Wall.DAE", "");
        create_file(&input, "Arena/Frigate.High.dae", "");
        create_file(&input, "Arena/Props/Ball.dae", "");
        create_file(&input, "Arena/texture.png", "");

        let config = PipelineConfig::default();
        let converter = RecordingConverter::default();
        let report = build_models(&BuildContext::new(&config, &converter), &input, &output);

        assert!(report.is_success());
        assert_eq!(
            list_files(&output),
            vec![
                "Arena/Frigate.High.csmodel",
                "Arena/Props/Ball.csmodel",
                "Arena/Wall.csmodel",
                "Paddle.csmodel"
            ]
        );
        let recorded = converter.find("Paddle.csmodel");
        assert_eq!(recorded.invocation.tool, Tool::Model);
        assert_eq!(flags(&recorded), ["--swapyandz"]);
    }
}
