use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::tags::{extract_tags, TagString};

/// Files of one directory that share the same [`TagString`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub tags: TagString,
    pub files: Vec<PathBuf>,
}

fn file_tags(path: &Path) -> TagString {
    path.file_name()
        .map(|name| extract_tags(&name.to_string_lossy()))
        .unwrap_or_default()
}

/// Partitions `files` into groups of equal filename tags.
///
/// Every file ends up in exactly one group. Groups are emitted in the order in
/// which their first file appears in `files` and the files inside a group keep
/// their relative order.
///
/// # Example
///
/// ```rust
/// use std::path::PathBuf;
/// use kiln_content::partition::partition_by_tags;
/// let files = ["Image.high.png", "Plain.png", "Other.high.png"].map(PathBuf::from);
/// let groups = partition_by_tags(&files);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].tags.to_string(), "high");
/// assert_eq!(groups[0].files.len(), 2);
/// assert!(groups[1].tags.is_empty());
/// ```
pub fn partition_by_tags(files: &[PathBuf]) -> Vec<FileGroup> {
    let mut index = HashMap::<TagString, usize>::new();
    let mut groups = Vec::<FileGroup>::new();
    for file in files {
        let tags = file_tags(file);
        match index.get(&tags) {
            Some(&position) => groups[position].files.push(file.clone()),
            None => {
                index.insert(tags.clone(), groups.len());
                groups.push(FileGroup {
                    tags,
                    files: vec![file.clone()],
                });
            }
        }
    }
    groups
}
