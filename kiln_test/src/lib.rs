use std::{
    fs,
    path::{Path, PathBuf},
    sync::Once,
};

use kiln_shared::{itertools::Itertools, log::LevelFilter, walkdir::WalkDir};
use simple_logger::SimpleLogger;
use tempdir::TempDir;

static LOGGER: Once = Once::new();

/// Installs a logger for tests. Can be called from every test.
pub fn setup_logger() {
    LOGGER.call_once(|| {
        SimpleLogger::new()
            .with_level(LevelFilter::Trace)
            .init()
            .expect("failed to initialize the test logger");
    });
}

/// Creates a temporary directory named after the test function.
///
/// Use it together with `kiln_shared::function_name!()`.
pub fn test_root(function_name: &str) -> TempDir {
    let prefix = function_name.replace("::", ".");
    TempDir::new(&prefix).expect("failed to create the temporary test directory")
}

/// Writes `content` to `root/relative_path` and creates the parent directories.
pub fn create_file(root: &Path, relative_path: impl AsRef<Path>, content: &str) -> PathBuf {
    let path = root.join(relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create the parent directories of the test file");
    }
    fs::write(&path, content).expect("failed to write the test file");
    path
}

/// Returns the paths of all files below `root` relative to `root` with `/` as separator, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(|relative| relative.components().map(|c| c.as_os_str().to_string_lossy()).join("/"))
        })
        .sorted()
        .collect()
}
