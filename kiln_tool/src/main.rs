use std::{io, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre as ey;
use ey::eyre::{eyre, Context};
use kiln_content::{builders::build_audio, delete_directory, AssetType, BuildReport, ContentBuilder, PipelineConfig};
use kiln_shared::log::{error, info, warn, LevelFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineArguments {
    #[clap(subcommand)]
    command: Command,

    /// YAML file with the pipeline configuration. The defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Maximum level of the log messages
    #[arg(long, default_value = "info", global = true)]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuilds all asset types from the content root into the output root
    Build(Roots),
    /// Converts the textures of one directory
    Textures(Roots),
    /// Packs the texture atlases of one directory
    Atlases(Roots),
    /// Converts the models of one directory
    Models(Roots),
    /// Converts the text sheets of one directory
    Text(Roots),
    /// Copies the music or sound effects of one directory
    Audio(Roots),
    /// Picks a random variant of every configured particle image
    RandomizeParticles(Roots),
}

#[derive(Args, Debug)]
struct Roots {
    /// Input directory
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,
}

fn setup_logger(level: LevelFilter) -> ey::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                kiln_shared::chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stdout())
        .apply()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> ey::Result<PipelineConfig> {
    match path {
        Some(path) => {
            PipelineConfig::from_file(path).wrap_err_with(|| format!("Failed to load the pipeline configuration {path:?}"))
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn main() -> ey::Result<()> {
    color_eyre::install()?;
    let command_line_arguments = CommandLineArguments::parse();
    setup_logger(command_line_arguments.log_level)?;

    let config = load_config(command_line_arguments.config.as_ref())?;
    let content_builder = ContentBuilder::with_jar_converter(config);

    let report = match &command_line_arguments.command {
        Command::Build(roots) => content_builder.build_all(&roots.input, &roots.output),
        Command::Textures(roots) => content_builder.build_directory(AssetType::Textures, &roots.input, &roots.output),
        Command::Atlases(roots) => content_builder.build_directory(AssetType::TextureAtlases, &roots.input, &roots.output),
        Command::Models(roots) => content_builder.build_directory(AssetType::Models, &roots.input, &roots.output),
        Command::Text(roots) => content_builder.build_directory(AssetType::Text, &roots.input, &roots.output),
        Command::Audio(roots) => {
            delete_directory(&roots.output).wrap_err("Failed to delete the output directory")?;
            build_audio(&roots.input, &roots.output)
        }
        Command::RandomizeParticles(roots) => {
            if content_builder.config().particles.is_none() {
                return Err(eyre!("The pipeline configuration has no 'particles' section"));
            }
            content_builder.randomize_particles(&roots.input, &roots.output)
        }
    };

    summarize(&report)
}

fn summarize(report: &BuildReport) -> ey::Result<()> {
    info! {
        "Built {} files, skipped {}, failed {}",
        report.built.len(),
        report.skipped.len(),
        report.failed.len()
    }
    for issue in &report.skipped {
        warn!("Skipped {:?}: {}", issue.source, issue.error);
    }
    for issue in &report.failed {
        error!("Failed {:?}: {}", issue.source, issue.error);
    }
    if report.is_success() {
        Ok(())
    } else {
        Err(eyre!("{} items failed to build", report.failed.len()))
    }
}
