use std::path::{Path, PathBuf};

use kiln_shared::log::info;

use super::{relative_file_path, BuildContext};
use crate::{
    converter::{text_flags, Invocation, Tool},
    naming::mirrored_output_path,
    report::BuildReport,
    tags::TagString,
    walker::{content_directories, ensure_directory, Scope},
    Result,
};

pub const TEXT_SOURCE_EXTENSION: &str = "xls";
pub const TEXT_OUTPUT_EXTENSION: &str = ".cstext";

/// Converts every xls sheet below `input_root` once per configured language.
///
/// The fallback language is written without a language tag (`Strings.cstext`),
/// every other language gets one (`Strings.fr.cstext`).
pub fn build_text(context: &BuildContext, input_root: &Path, output_root: &Path) -> BuildReport {
    info!("Building text from {input_root:?} into {output_root:?}");
    let mut report = BuildReport::default();
    for directory in content_directories(input_root, TEXT_SOURCE_EXTENSION, Scope::All) {
        let output_directory = output_root.join(&directory.relative_path);
        if let Err(err) = ensure_directory(&output_directory) {
            report.record(&directory.path, Err(err));
            continue;
        }
        for file in &directory.files {
            for language in &context.config.text.languages {
                let result = build_language(context, &directory.relative_path, file, output_root, language);
                report.record(file, result);
            }
        }
    }
    report
}

fn language_tags(language: &str, fallback_language: &str) -> TagString {
    if language.eq_ignore_ascii_case(fallback_language) {
        TagString::empty()
    } else {
        TagString::parse(language)
    }
}

fn build_language(context: &BuildContext, relative_directory: &Path, file: &Path, output_root: &Path, language: &str) -> Result<PathBuf> {
    let text_config = &context.config.text;
    let relative_path = relative_file_path(relative_directory, file)?;
    let tags = language_tags(language, &text_config.fallback_language);
    let output = mirrored_output_path(&relative_path, output_root, &tags, TEXT_OUTPUT_EXTENSION)?;

    info!("Building text: {output:?}");
    let invocation = Invocation::new(Tool::Text, file, &output).with_flags(text_flags(language, text_config));
    context.converter.convert(&invocation)?;
    Ok(output)
}
