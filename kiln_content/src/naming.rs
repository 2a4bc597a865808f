//! Output paths for built assets.
//!
//! Source trees encode variants in the directory level directly above the
//! files, e.g. `Textures/GUI/Med.Wide/icon.png`. That level is flattened away
//! and its tags move into the file name: `Textures/GUI/icon.med.wide.csimage`.

use std::path::{Component, Path, PathBuf};

use crate::{
    common::extract_file_name_from_path,
    tags::{split_name, synthesize_name, TagString},
    Error, Result,
};

fn normal_segments(path: &Path) -> Result<Vec<String>> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_str().map(str::to_owned).ok_or(Error::InvalidPath(path.to_owned()))),
            _ => None,
        })
        .collect()
}

/// Output path for a file whose variant is selected by its parent directory.
///
/// `relative_input` is relative to the asset type root. The parent directory
/// is dropped from the output and its dot-separated segments become tags,
/// followed by the tags of the file name itself.
///
/// # Errors
///
/// [`Error::MissingTagContext`] when `relative_input` has no parent directory.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use kiln_content::naming::tagged_output_path;
/// let output = tagged_output_path(Path::new("GUI/Med.Wide/icon.png"), Path::new("out"), ".csimage").unwrap();
/// assert_eq!(output, Path::new("out/GUI/icon.med.wide.csimage"));
/// ```
pub fn tagged_output_path(relative_input: &Path, output_root: &Path, extension: &str) -> Result<PathBuf> {
    let segments = normal_segments(relative_input)?;
    let [directories @ .., tag_directory, file_name] = segments.as_slice() else {
        return Err(Error::MissingTagContext(relative_input.to_owned()));
    };

    let (base, file_tags, _) = split_name(file_name);
    let tags = TagString::parse(tag_directory).chain(&file_tags);

    let mut output = output_root.to_owned();
    output.extend(directories);
    output.push(synthesize_name(&base, &tags, extension));
    Ok(output)
}

/// Output path that mirrors `relative_input` and only replaces its extension.
/// The file stem is kept as it is, `extra_tags` are appended to it.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use kiln_content::{naming::mirrored_output_path, tags::TagString};
/// let output = mirrored_output_path(Path::new("Menus/Strings.xls"), Path::new("out"), &TagString::parse("fr"), ".cstext").unwrap();
/// assert_eq!(output, Path::new("out/Menus/Strings.fr.cstext"));
/// ```
pub fn mirrored_output_path(relative_input: &Path, output_root: &Path, extra_tags: &TagString, extension: &str) -> Result<PathBuf> {
    let stem = relative_input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::InvalidPath(relative_input.to_owned()))?;

    let mut output = output_root.to_owned();
    if let Some(parent) = relative_input.parent() {
        output.push(parent);
    }
    output.push(synthesize_name(stem, extra_tags, extension));
    Ok(output)
}

/// Output path of an atlas: `<output_directory>/<name of output_directory>[.<tags>]<extension>`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use kiln_content::{naming::atlas_output_path, tags::TagString};
/// let output = atlas_output_path(Path::new("out/GUI"), &TagString::parse("high"), ".csatlas").unwrap();
/// assert_eq!(output, Path::new("out/GUI/GUI.high.csatlas"));
/// ```
pub fn atlas_output_path(output_directory: &Path, tags: &TagString, extension: &str) -> Result<PathBuf> {
    let name = extract_file_name_from_path(output_directory)?;
    Ok(output_directory.join(synthesize_name(&name, tags, extension)))
}
