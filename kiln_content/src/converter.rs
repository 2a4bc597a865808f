use std::{
    ffi::OsString,
    fmt::{self, Formatter},
    path::{Path, PathBuf},
    process::Command,
};

use kiln_shared::{
    log::{error, trace},
    thiserror,
};

use crate::{
    config::{AtlasConfig, TextConfig},
    tags::TagString,
    PipelineConfig,
};

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Could not execute '{program}': {message}")]
    FailedToStart { program: String, message: String },
    #[error("{tool} converter exited with {status} while converting '{input}':\nstderr:\n{stderr}")]
    ExitStatus {
        tool: Tool,
        input: PathBuf,
        status: String,
        stderr: String,
    },
}

/// The external converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Texture,
    Atlas,
    Model,
    Text,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Texture => "Texture",
            Tool::Atlas => "Atlas",
            Tool::Model => "Model",
            Tool::Text => "Text",
        };
        write!(f, "{name}")
    }
}

/// A single request to a converter: convert `input` into `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Tool specific flags that follow `--input` and `--output`.
    pub flags: Vec<String>,
}

impl Invocation {
    pub fn new(tool: Tool, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            input: input.into(),
            output: output.into(),
            flags: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: impl IntoIterator<Item = String>) -> Self {
        self.flags.extend(flags);
        self
    }

    /// Arguments for the converter: `--input <path> --output <path> <flags...>`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kiln_content::converter::{Invocation, Tool};
    /// let invocation = Invocation::new(Tool::Model, "in/ship.dae", "out/ship.csmodel").with_flags(["--swapyandz".to_owned()]);
    /// let arguments = invocation.arguments();
    /// assert_eq!(arguments, ["--input", "in/ship.dae", "--output", "out/ship.csmodel", "--swapyandz"]);
    /// ```
    pub fn arguments(&self) -> Vec<OsString> {
        let mut arguments = vec![
            OsString::from("--input"),
            self.input.clone().into_os_string(),
            OsString::from("--output"),
            self.output.clone().into_os_string(),
        ];
        arguments.extend(self.flags.iter().map(OsString::from));
        arguments
    }
}

/// Converts a single input into a single output.
///
/// Implementations block until the conversion is done.
pub trait Converter {
    fn convert(&self, invocation: &Invocation) -> Result<(), ConversionError>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn convert(&self, invocation: &Invocation) -> Result<(), ConversionError> {
        (**self).convert(invocation)
    }
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    fn convert(&self, invocation: &Invocation) -> Result<(), ConversionError> {
        (**self).convert(invocation)
    }
}

/// Runs the converter jars: `<runtime> <jvm flags> -jar <jar> <arguments>`.
#[derive(Debug, Clone)]
pub struct JarConverter {
    runtime: String,
    jvm_flags: Vec<String>,
    texture_jar: PathBuf,
    atlas_jar: PathBuf,
    model_jar: PathBuf,
    text_jar: PathBuf,
}

impl JarConverter {
    pub fn new(config: &PipelineConfig) -> Self {
        let jar = |name: &str| config.tools_directory.join(name);
        Self {
            runtime: config.runtime.clone(),
            jvm_flags: config.jvm_flags.clone(),
            texture_jar: jar(&config.tools.texture),
            atlas_jar: jar(&config.tools.atlas),
            model_jar: jar(&config.tools.model),
            text_jar: jar(&config.tools.text),
        }
    }

    fn jar(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Texture => &self.texture_jar,
            Tool::Atlas => &self.atlas_jar,
            Tool::Model => &self.model_jar,
            Tool::Text => &self.text_jar,
        }
    }

    /// The command that runs the converter for `invocation`.
    pub fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(&self.runtime);
        command
            .args(&self.jvm_flags)
            .arg("-jar")
            .arg(self.jar(invocation.tool))
            .args(invocation.arguments());
        command
    }
}

impl Converter for JarConverter {
    fn convert(&self, invocation: &Invocation) -> Result<(), ConversionError> {
        let mut command = self.command(invocation);
        trace!("Running converter: {command:?}");
        let output = command.output().map_err(|err| ConversionError::FailedToStart {
            program: self.runtime.clone(),
            message: err.to_string(),
        })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(
                "{} converter failed for '{}':\nstdout:\n{}",
                invocation.tool,
                invocation.input.display(),
                String::from_utf8_lossy(&output.stdout)
            );
            Err(ConversionError::ExitStatus {
                tool: invocation.tool,
                input: invocation.input.clone(),
                status: output.status.to_string(),
                stderr,
            })
        }
    }
}

/// Maximum atlas width and height for the given tags.
pub fn atlas_max_size(tags: &TagString, config: &AtlasConfig) -> u32 {
    if tags.contains(&config.high_tag) {
        config.high_max_size
    } else {
        config.default_max_size
    }
}

/// `--maxwidth N --maxheight N --padding P`
pub fn atlas_flags(tags: &TagString, config: &AtlasConfig) -> Vec<String> {
    let max_size = atlas_max_size(tags, config).to_string();
    vec![
        "--maxwidth".to_owned(),
        max_size.clone(),
        "--maxheight".to_owned(),
        max_size,
        "--padding".to_owned(),
        config.padding.to_string(),
    ]
}

pub fn model_flags() -> Vec<String> {
    vec!["--swapyandz".to_owned()]
}

/// `--language <code> --logginglevel <level>`
pub fn text_flags(language: &str, config: &TextConfig) -> Vec<String> {
    vec![
        "--language".to_owned(),
        language.to_owned(),
        "--logginglevel".to_owned(),
        config.logging_level.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_atlases_are_larger() {
        let config = AtlasConfig::default();
        assert_eq!(atlas_max_size(&TagString::parse("high"), &config), 4096);
        assert_eq!(atlas_max_size(&TagString::parse("wide.High"), &config), 4096);
        assert_eq!(atlas_max_size(&TagString::parse("med"), &config), 2048);
        assert_eq!(atlas_max_size(&TagString::empty(), &config), 2048);
    }

    #[test]
    fn atlas_flag_layout() {
        let flags = atlas_flags(&TagString::parse("high"), &AtlasConfig::default());
        assert_eq!(flags, ["--maxwidth", "4096", "--maxheight", "4096", "--padding", "2"]);
    }

    #[test]
    fn text_flag_layout() {
        assert_eq!(
            text_flags("fr", &TextConfig::default()),
            ["--language", "fr", "--logginglevel", "error"]
        );
    }

    #[test]
    fn jar_command_layout() {
        let config = PipelineConfig {
            tools_directory: PathBuf::from("tools"),
            ..PipelineConfig::default()
        };
        let converter = JarConverter::new(&config);
        let invocation = Invocation::new(Tool::Texture, "in/icon.png", "out/icon.csimage");
        let command = converter.command(&invocation);

        assert_eq!(command.get_program(), "java");
        let arguments = command.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect::<Vec<_>>();
        let jar = Path::new("tools").join("PNGToCSImage.jar").to_string_lossy().into_owned();
        assert_eq!(
            arguments,
            [
                "-Djava.awt.headless=true",
                "-Xmx512m",
                "-jar",
                jar.as_str(),
                "--input",
                "in/icon.png",
                "--output",
                "out/icon.csimage",
            ]
        );
    }

    #[test]
    fn missing_runtime_is_an_error() {
        let config = PipelineConfig {
            runtime: "kiln-runtime-that-does-not-exist".to_owned(),
            ..PipelineConfig::default()
        };
        let converter = JarConverter::new(&config);
        let result = converter.convert(&Invocation::new(Tool::Model, "a.dae", "a.csmodel"));
        assert!(matches!(result, Err(ConversionError::FailedToStart { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_an_error() {
        let config = PipelineConfig {
            runtime: "false".to_owned(),
            jvm_flags: Vec::new(),
            ..PipelineConfig::default()
        };
        let converter = JarConverter::new(&config);
        let result = converter.convert(&Invocation::new(Tool::Model, "a.dae", "a.csmodel"));
        assert!(matches!(result, Err(ConversionError::ExitStatus { tool: Tool::Model, .. })));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let config = PipelineConfig {
            runtime: "true".to_owned(),
            jvm_flags: Vec::new(),
            ..PipelineConfig::default()
        };
        let converter = JarConverter::new(&config);
        converter.convert(&Invocation::new(Tool::Text, "a.xls", "a.cstext")).unwrap();
    }
}
