use std::{
    fmt::{self, Formatter},
    fs, io,
    path::{Path, PathBuf},
    result,
};

use kiln_shared::{log::trace, thiserror};

use crate::converter::ConversionError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
    #[error("Path has no tag directory (e.g. Med, High, Low): {0}")]
    MissingTagContext(PathBuf),
    #[error("Expected source file not found: {0}")]
    MissingSourceFile(PathBuf),
    #[error("Files '{first}' and '{second}' both stage as '{staged_name}'")]
    StagingCollision {
        first: PathBuf,
        second: PathBuf,
        staged_name: String,
    },
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),
    #[error("Invalid configuration in '{path}': {message}")]
    InvalidConfig { path: PathBuf, message: String },
}

/// The asset types the pipeline knows about. Every type owns one subdirectory
/// of the input root and the same subdirectory of the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetType {
    Models,
    Textures,
    TextureAtlases,
    Music,
    Sfx,
    Text,
}

impl AssetType {
    /// All asset types in the order in which they are built.
    pub const BUILD_ORDER: [AssetType; 6] = [
        AssetType::Models,
        AssetType::Textures,
        AssetType::TextureAtlases,
        AssetType::Music,
        AssetType::Sfx,
        AssetType::Text,
    ];

    /// Name of the subdirectory in the input and output root.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kiln_content::AssetType;
    /// assert_eq!(AssetType::TextureAtlases.directory_name(), "TextureAtlases");
    /// ```
    pub fn directory_name(&self) -> &'static str {
        match self {
            AssetType::Models => "Models",
            AssetType::Textures => "Textures",
            AssetType::TextureAtlases => "TextureAtlases",
            AssetType::Music => "Music",
            AssetType::Sfx => "SFX",
            AssetType::Text => "Text",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directory_name())
    }
}

/// Returns the lowercase extension of `path` without the leading `.`.
pub(crate) fn extract_extension_from_path(path: &Path) -> Result<String> {
    Ok(path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_lowercase())
        .ok_or(Error::InvalidPath(path.to_owned()))?
        .to_owned())
}

pub(crate) fn extract_file_name_from_path(path: &Path) -> Result<String> {
    Ok(path
        .file_name()
        .and_then(|file_name| file_name.to_str())
        .ok_or(Error::InvalidPath(path.to_owned()))?
        .to_owned())
}

/// Whether the path has the given extension. The comparison ignores case and
/// the extension may be given with or without the leading `.`.
///
/// # Example
///
/// ```rust
/// use kiln_content::has_extension;
/// assert!(has_extension("GUI/Med/Icon.PNG", ".png"));
/// assert!(has_extension("GUI/Med/Icon.png", "PNG"));
/// assert!(!has_extension("GUI/Med/Icon.png.bak", "png"));
/// ```
pub fn has_extension(path: impl AsRef<Path>, extension: &str) -> bool {
    let expected = extension.trim_start_matches('.').to_lowercase();
    extract_extension_from_path(path.as_ref())
        .map(|actual| actual == expected)
        .unwrap_or(false)
}

/// Deletes a directory and everything in it. A directory that doesn't exist is not an error.
pub fn delete_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        trace!("Deleting directory: {path:?}");
        fs::remove_dir_all(path)?;
    }
    Ok(())
}
