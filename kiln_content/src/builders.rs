//! One builder per asset type. Every builder walks its input root, converts
//! what it finds into the mirrored output root and reports per item.

mod atlas;
mod audio;
mod model;
mod particles;
mod text;
mod texture;

use std::{
    env,
    path::{Path, PathBuf},
};

pub use atlas::{build_atlases, ATLAS_OUTPUT_EXTENSION, ATLAS_SOURCE_EXTENSION};
pub use audio::build_audio;
pub use model::{build_models, MODEL_OUTPUT_EXTENSION, MODEL_SOURCE_EXTENSION};
pub use particles::randomize_particles;
pub use text::{build_text, TEXT_OUTPUT_EXTENSION, TEXT_SOURCE_EXTENSION};
pub use texture::{build_textures, TEXTURE_OUTPUT_EXTENSION, TEXTURE_SOURCE_EXTENSION};

use crate::{converter::Converter, PipelineConfig};

/// Everything a builder needs besides its input and output root.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a PipelineConfig,
    pub converter: &'a dyn Converter,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a PipelineConfig, converter: &'a dyn Converter) -> Self {
        Self { config, converter }
    }

    /// Directory in which staging directories are created.
    pub fn staging_root(&self) -> PathBuf {
        self.config.staging_root.clone().unwrap_or_else(env::temp_dir)
    }
}

/// Path of `file` relative to the walked root, given the relative path of its directory.
fn relative_file_path(relative_directory: &Path, file: &Path) -> crate::Result<PathBuf> {
    let file_name = crate::common::extract_file_name_from_path(file)?;
    Ok(relative_directory.join(file_name))
}
