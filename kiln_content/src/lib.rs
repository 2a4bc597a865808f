//! # Overview
//!
//! Crate for [building](ContentBuilder) the runtime content of a game from
//! its source content.
//!
//! This crate is based around the idea of two structurally mirrored directory
//! trees. One is the source directory, which contains the original assets
//! and the other is the output directory, which contains the built assets.
//! Both contain one directory per [`AssetType`]. Inside an asset type
//! directory, the relative location of a built file is the relative location
//! of its source file, with two exceptions: textures live in a tag directory
//! (e.g. `Med`, `High.Wide`) that is folded into the file name, and atlases
//! combine all images of one directory that share the same tags.
//!
//! ## Example:
//!
//! **Source Directory:**
//!
//! ```text
//! Content/
//! ├─ Textures/
//! │  ├─ GUI/
//! │  │  ├─ Med/
//! │  │  │  ├─ icon.png
//! │  │  ├─ Med.Wide/
//! │  │  │  ├─ icon.png
//! ├─ TextureAtlases/
//! │  ├─ GUI/
//! │  │  ├─ Image.high.png
//! │  │  ├─ Other.high.png
//! │  │  ├─ Plain.png
//! ├─ Models/
//! │  ├─ Paddle.dae
//! ```
//!
//! **Output Directory:**
//!
//! ```text
//! Built/
//! ├─ Textures/
//! │  ├─ GUI/
//! │  │  ├─ icon.med.csimage
//! │  │  ├─ icon.med.wide.csimage
//! ├─ TextureAtlases/
//! │  ├─ GUI/
//! │  │  ├─ GUI.csatlas
//! │  │  ├─ GUI.high.csatlas
//! ├─ Models/
//! │  ├─ Paddle.csmodel
//! ```
//!
//! # Components
//!
//! The [`ContentBuilder`] runs the [builders](builders) of all asset types.
//! The builders are made of the [tag](tags) codec, the [partitioner](partition),
//! the [naming](naming) rules, [staging](staging) directories and the
//! external [converters](converter).

mod common;
mod content_builder;
mod report;
mod walker;

pub mod builders;
pub mod config;
pub mod converter;
pub mod naming;
pub mod partition;
pub mod staging;
pub mod tags;

#[cfg(test)]
mod testing;

pub use builders::BuildContext;
pub use common::{delete_directory, has_extension, AssetType, Error, Result};
pub use config::PipelineConfig;
pub use content_builder::ContentBuilder;
pub use report::{BuildIssue, BuildReport};
pub use walker::{content_directories, ensure_directory, leaf_directories, ContentDirectory, Scope};
