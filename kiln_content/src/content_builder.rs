use std::path::Path;

use kiln_shared::log::{error, info};

use crate::{
    builders::{build_atlases, build_audio, build_models, build_text, build_textures, randomize_particles, BuildContext},
    common::{delete_directory, AssetType},
    converter::{Converter, JarConverter},
    report::BuildReport,
    PipelineConfig,
};

/// Runs the builders of all asset types over one input and one output root.
///
/// Every build is a full rebuild: the output directory of an asset type is
/// deleted before the asset type is built.
///
/// # Example
///
/// ```rust,no_run
/// use kiln_content::{ContentBuilder, PipelineConfig};
/// let content_builder = ContentBuilder::with_jar_converter(PipelineConfig::default());
/// let report = content_builder.build_all("Content/Source", "Content/Built");
/// assert!(report.is_success());
/// ```
pub struct ContentBuilder<C> {
    config: PipelineConfig,
    converter: C,
}

impl ContentBuilder<JarConverter> {
    /// Creates a [`ContentBuilder`] that runs the converter jars named in the config.
    pub fn with_jar_converter(config: PipelineConfig) -> Self {
        let converter = JarConverter::new(&config);
        Self::new(config, converter)
    }
}

impl<C: Converter> ContentBuilder<C> {
    pub fn new(config: PipelineConfig, converter: C) -> Self {
        Self { config, converter }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Builds every asset type in [`AssetType::BUILD_ORDER`] and, when configured, randomizes the particles.
    pub fn build_all(&self, input_root: impl AsRef<Path>, output_root: impl AsRef<Path>) -> BuildReport {
        let (input_root, output_root) = (input_root.as_ref(), output_root.as_ref());
        info!("Building all content from {input_root:?} into {output_root:?}");

        let mut report = BuildReport::default();
        for asset_type in AssetType::BUILD_ORDER {
            report.merge(self.build(asset_type, input_root, output_root));
        }
        if self.config.particles.is_some() {
            report.merge(self.randomize_particles(input_root, output_root));
        }

        info! {
            "Finished building content: {} built, {} skipped, {} failed",
            report.built.len(),
            report.skipped.len(),
            report.failed.len()
        }
        report
    }

    /// Rebuilds a single asset type. `input_root` and `output_root` are the
    /// roots that contain the asset type directories.
    pub fn build(&self, asset_type: AssetType, input_root: impl AsRef<Path>, output_root: impl AsRef<Path>) -> BuildReport {
        let directory_name = asset_type.directory_name();
        self.build_directory(
            asset_type,
            &input_root.as_ref().join(directory_name),
            &output_root.as_ref().join(directory_name),
        )
    }

    /// Rebuilds a single asset type from `input_directory` into `output_directory`.
    pub fn build_directory(&self, asset_type: AssetType, input_directory: &Path, output_directory: &Path) -> BuildReport {
        info!("Building {asset_type}");
        let mut report = BuildReport::default();
        if let Err(err) = delete_directory(output_directory) {
            error!("Failed to delete the output directory of {asset_type}");
            report.record(output_directory, Err(err));
            return report;
        }

        let context = BuildContext::new(&self.config, &self.converter);
        match asset_type {
            AssetType::Models => build_models(&context, input_directory, output_directory),
            AssetType::Textures => build_textures(&context, input_directory, output_directory),
            AssetType::TextureAtlases => build_atlases(&context, input_directory, output_directory),
            AssetType::Music | AssetType::Sfx => build_audio(input_directory, output_directory),
            AssetType::Text => build_text(&context, input_directory, output_directory),
        }
    }

    /// Runs the particle randomizer with the directories from the config. Does nothing without a particle config.
    pub fn randomize_particles(&self, input_root: impl AsRef<Path>, output_root: impl AsRef<Path>) -> BuildReport {
        match &self.config.particles {
            Some(particles) => randomize_particles(
                particles,
                &input_root.as_ref().join(&particles.input_directory),
                &output_root.as_ref().join(&particles.output_directory),
            ),
            None => BuildReport::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use kiln_shared::function_name;
    use kiln_test::{create_file, list_files, setup_logger, test_root};

    use super::*;
    use crate::{config::ParticleConfig, converter::Tool, testing::RecordingConverter};

    fn create_sample_content(input: &Path) {
        create_file(input, "Models/Paddle.dae", "");
        create_file(input, "Textures/GUI/Med/icon.png", "");
        create_file(input, "Textures/GUI/Med.Wide/icon.png", "");
        create_file(input, "TextureAtlases/GUI/Image.high.png", "");
        create_file(input, "TextureAtlases/GUI/Other.high.png", "");
        create_file(input, "TextureAtlases/GUI/Plain.png", "");
        create_file(input, "Music/Theme.ogg", "theme");
        create_file(input, "SFX/Bounce.wav", "bounce");
        create_file(input, "Text/Strings.xls", "");
    }

    fn config(root: &Path) -> PipelineConfig {
        PipelineConfig {
            staging_root: Some(root.join("staging")),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn build_all() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Content");
        let output = root.path().join("Built");
        create_sample_content(&input);

        let converter = RecordingConverter::default();
        let content_builder = ContentBuilder::new(config(root.path()), &converter);
        let report = content_builder.build_all(&input, &output);

        assert!(report.is_success());
        assert!(report.skipped.is_empty());
        assert_eq!(
            list_files(&output),
            vec![
                "Models/Paddle.csmodel",
                "Music/Theme.ogg",
                "SFX/Bounce.wav",
                "Text/Strings.cstext",
                "TextureAtlases/GUI/GUI.csatlas",
                "TextureAtlases/GUI/GUI.high.csatlas",
                "Textures/GUI/icon.med.csimage",
                "Textures/GUI/icon.med.wide.csimage",
            ]
        );

        let tools = converter.recorded().iter().map(|recorded| recorded.invocation.tool).collect::<Vec<_>>();
        assert_eq!(
            tools,
            [Tool::Model, Tool::Texture, Tool::Texture, Tool::Atlas, Tool::Atlas, Tool::Text]
        );
        assert_eq!(fs::read_dir(root.path().join("staging")).unwrap().count(), 0);
    }

    #[test]
    fn stale_output_is_removed() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Content");
        let output = root.path().join("Built");
        create_sample_content(&input);
        create_file(&output, "Textures/GUI/old.csimage", "stale");
        create_file(&output, "Models/Removed.csmodel", "stale");

        let converter = RecordingConverter::default();
        let content_builder = ContentBuilder::new(config(root.path()), &converter);
        content_builder.build_all(&input, &output);

        let files = list_files(&output);
        assert!(!files.contains(&"Textures/GUI/old.csimage".to_owned()));
        assert!(!files.contains(&"Models/Removed.csmodel".to_owned()));
        assert!(files.contains(&"Textures/GUI/icon.med.csimage".to_owned()));
    }

    #[test]
    fn single_asset_type_leaves_others_alone() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Content");
        let output = root.path().join("Built");
        create_sample_content(&input);
        create_file(&output, "Models/Kept.csmodel", "kept");
        create_file(&output, "Textures/stale.csimage", "stale");

        let converter = RecordingConverter::default();
        let content_builder = ContentBuilder::new(config(root.path()), &converter);
        let report = content_builder.build(AssetType::Textures, &input, &output);

        assert_eq!(report.built.len(), 2);
        assert_eq!(
            list_files(&output),
            vec![
                "Models/Kept.csmodel",
                "Textures/GUI/icon.med.csimage",
                "Textures/GUI/icon.med.wide.csimage"
            ]
        );
    }

    #[test]
    fn missing_asset_directories_are_not_errors() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Content");
        create_file(&input, "SFX/Bounce.wav", "");

        let converter = RecordingConverter::default();
        let content_builder = ContentBuilder::new(config(root.path()), &converter);
        let report = content_builder.build_all(&input, root.path().join("Built"));

        assert!(report.is_success());
        assert_eq!(report.built.len(), 1);
    }

    #[test]
    fn converter_failures_are_reported_and_the_build_continues() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Content");
        let output = root.path().join("Built");
        create_sample_content(&input);

        let converter = RecordingConverter::failing_for(&["Paddle.csmodel", "GUI.high.csatlas"]);
        let content_builder = ContentBuilder::new(config(root.path()), &converter);
        let report = content_builder.build_all(&input, &output);

        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 2);
        assert_eq!(converter.recorded().len(), 6);
        assert!(list_files(&output).contains(&"Text/Strings.cstext".to_owned()));
    }

    #[test]
    fn empty_particle_range_is_reported_as_failure() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Content");
        let output = root.path().join("Built");
        create_file(&input, "Particles/Smoke_1.png", "smoke");
        create_file(&input, "SFX/Bounce.wav", "bounce");

        let mut config = config(root.path());
        config.particles = Some(ParticleConfig {
            prefixes: vec!["Smoke".to_owned()],
            min_variant: 3,
            max_variant: 1,
            ..ParticleConfig::default()
        });
        let converter = RecordingConverter::default();
        let report = ContentBuilder::new(config, &converter).build_all(&input, &output);

        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].error, crate::Error::InvalidConfig { .. }));
        assert_eq!(list_files(&output), vec!["SFX/Bounce.wav"]);
    }

    #[test]
    fn particles_are_randomized_after_the_build() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Content");
        let output = root.path().join("Built");
        create_file(&input, "Particles/Smoke_0.png", "smoke");

        let mut config = config(root.path());
        config.particles = Some(ParticleConfig {
            input_directory: "Particles".into(),
            output_directory: "Textures/Particles".into(),
            prefixes: vec!["Smoke".to_owned()],
            min_variant: 0,
            max_variant: 0,
        });
        let converter = RecordingConverter::default();
        let report = ContentBuilder::new(config, &converter).build_all(&input, &output);

        assert!(report.is_success());
        assert_eq!(list_files(&output), vec!["Textures/Particles/Smoke.png"]);
    }
}
