use std::{
    fs,
    path::{Path, PathBuf},
};

use kiln_shared::log::info;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration of the whole pipeline. Every field has a default so that a
/// config file only has to contain what differs.
///
/// # Example
///
/// ```rust
/// use kiln_content::PipelineConfig;
/// let config = PipelineConfig::from_yaml_str("atlas:\n  high_max_size: 8192\n").unwrap();
/// assert_eq!(config.atlas.high_max_size, 8192);
/// assert_eq!(config.atlas.default_max_size, 2048);
/// assert_eq!(config.runtime, "java");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Program that runs the converter jars.
    pub runtime: String,
    /// Flags passed to the runtime before `-jar`.
    pub jvm_flags: Vec<String>,
    /// Directory containing the converter jars.
    pub tools_directory: PathBuf,
    pub tools: ToolsConfig,
    pub atlas: AtlasConfig,
    pub text: TextConfig,
    /// Directory in which staging directories are created. Defaults to the system temp directory.
    pub staging_root: Option<PathBuf>,
    /// Particle randomization is only done when this is set.
    pub particles: Option<ParticleConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            runtime: "java".to_owned(),
            jvm_flags: vec!["-Djava.awt.headless=true".to_owned(), "-Xmx512m".to_owned()],
            tools_directory: PathBuf::from("../../ChilliSource/Tools"),
            tools: ToolsConfig::default(),
            atlas: AtlasConfig::default(),
            text: TextConfig::default(),
            staging_root: None,
            particles: None,
        }
    }
}

/// File names of the converter jars inside [`PipelineConfig::tools_directory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub texture: String,
    pub atlas: String,
    pub model: String,
    pub text: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            texture: "PNGToCSImage.jar".to_owned(),
            atlas: "CSAtlasBuilder.jar".to_owned(),
            model: "ColladaToCSModel.jar".to_owned(),
            text: "CSTextBuilder.jar".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Maximum width and height of an atlas.
    pub default_max_size: u32,
    /// Maximum width and height of an atlas whose tags contain [`AtlasConfig::high_tag`].
    pub high_max_size: u32,
    pub high_tag: String,
    pub padding: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            default_max_size: 2048,
            high_max_size: 4096,
            high_tag: "high".to_owned(),
            padding: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// A text file is built once per language.
    pub languages: Vec<String>,
    /// The language whose output carries no language tag.
    pub fallback_language: String,
    pub logging_level: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_owned()],
            fallback_language: "en".to_owned(),
            logging_level: "error".to_owned(),
        }
    }
}

/// Picks one of several numbered variants of a particle image per build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    /// Directory of the variants relative to the input root.
    pub input_directory: PathBuf,
    /// Directory of the chosen images relative to the output root.
    pub output_directory: PathBuf,
    /// For the prefix `Smoke` the variants are `Smoke_0.png`, `Smoke_1.png`, ...
    pub prefixes: Vec<String>,
    pub min_variant: u32,
    /// Inclusive.
    pub max_variant: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from("Particles"),
            output_directory: PathBuf::from("Particles"),
            prefixes: Vec::new(),
            min_variant: 0,
            max_variant: 3,
        }
    }
}

impl PipelineConfig {
    /// Reads the configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading pipeline configuration from {path:?}");
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Reads the configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<string>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(content).map_err(|err| Error::InvalidConfig {
            path: path.to_owned(),
            message: err.to_string(),
        })?;
        config.check(path)?;
        Ok(config)
    }

    fn check(&self, path: &Path) -> Result<()> {
        let invalid = |message: &str| Error::InvalidConfig {
            path: path.to_owned(),
            message: message.to_owned(),
        };
        if self.runtime.is_empty() {
            return Err(invalid("runtime must not be empty"));
        }
        if self.text.languages.is_empty() {
            return Err(invalid("text.languages must contain at least one language"));
        }
        if let Some(particles) = &self.particles {
            if particles.min_variant > particles.max_variant {
                return Err(invalid("particles.min_variant must not be greater than particles.max_variant"));
            }
        }
        Ok(())
    }
}
