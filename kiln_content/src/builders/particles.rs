use std::{
    fs,
    path::{Path, PathBuf},
};

use kiln_shared::{
    log::info,
    rand::{self, Rng},
};

use crate::{config::ParticleConfig, report::BuildReport, walker::ensure_directory, Error, Result};

/// Copies one randomly chosen variant per particle prefix.
///
/// For the prefix `Smoke` one of `Smoke_<min>.png` to `Smoke_<max>.png` in
/// `input_directory` is copied to `Smoke.png` in `output_directory`. A missing
/// variant is skipped.
pub fn randomize_particles(config: &ParticleConfig, input_directory: &Path, output_directory: &Path) -> BuildReport {
    randomize_particles_with(config, input_directory, output_directory, &mut rand::thread_rng())
}

pub(crate) fn randomize_particles_with<R: Rng>(
    config: &ParticleConfig,
    input_directory: &Path,
    output_directory: &Path,
    rng: &mut R,
) -> BuildReport {
    info!("Randomizing particle images from {input_directory:?} into {output_directory:?}");
    let mut report = BuildReport::default();
    if !input_directory.is_dir() {
        report.record(input_directory, Err(Error::MissingSourceFile(input_directory.to_owned())));
        return report;
    }
    if config.min_variant > config.max_variant {
        let err = Error::InvalidConfig {
            path: input_directory.to_owned(),
            message: format!(
                "particle variant range {}..={} is empty",
                config.min_variant, config.max_variant
            ),
        };
        report.record(input_directory, Err(err));
        return report;
    }
    if let Err(err) = ensure_directory(output_directory) {
        report.record(output_directory, Err(err));
        return report;
    }

    for prefix in &config.prefixes {
        let variant = rng.gen_range(config.min_variant..=config.max_variant);
        let source = input_directory.join(format!("{prefix}_{variant}.png"));
        let result = copy_variant(&source, &output_directory.join(format!("{prefix}.png")));
        report.record(&source, result);
    }
    report
}

fn copy_variant(source: &Path, output: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(Error::MissingSourceFile(source.to_owned()));
    }
    fs::copy(source, output)?;
    Ok(output.to_owned())
}

#[cfg(test)]
mod tests {
    use kiln_shared::{function_name, rand::rngs::mock::StepRng};
    use kiln_test::{create_file, list_files, setup_logger, test_root};

    use super::*;

    fn config(prefixes: &[&str], min_variant: u32, max_variant: u32) -> ParticleConfig {
        ParticleConfig {
            prefixes: prefixes.iter().map(|prefix| prefix.to_string()).collect(),
            min_variant,
            max_variant,
            ..ParticleConfig::default()
        }
    }

    #[test]
    fn one_variant_per_prefix() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Particles");
        let output = root.path().join("out");
        for variant in 0..=3 {
            create_file(&input, format!("Smoke_{variant}.png"), &format!("smoke {variant}"));
            create_file(&input, format!("Spark_{variant}.png"), &format!("spark {variant}"));
        }

        let report = randomize_particles(&config(&["Smoke", "Spark"], 0, 3), &input, &output);

        assert!(report.is_success());
        assert_eq!(list_files(&output), vec!["Smoke.png", "Spark.png"]);
        let smoke = fs::read_to_string(output.join("Smoke.png")).unwrap();
        assert!(smoke.starts_with("smoke "), "unexpected content: {smoke}");
    }

    #[test]
    fn fixed_range_picks_that_variant() {
        let root = test_root(function_name!());
        let input = root.path().join("Particles");
        let output = root.path().join("out");
        create_file(&input, "Beam_2.png", "beam 2");

        let report = randomize_particles_with(&config(&["Beam"], 2, 2), &input, &output, &mut StepRng::new(0, 1));

        assert_eq!(report.built, vec![output.join("Beam.png")]);
        assert_eq!(fs::read_to_string(output.join("Beam.png")).unwrap(), "beam 2");
    }

    #[test]
    fn missing_variant_is_skipped() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Particles");
        let output = root.path().join("out");
        create_file(&input, "Smoke_0.png", "");

        let report = randomize_particles(&config(&["Smoke", "Beam"], 0, 0), &input, &output);

        assert!(report.is_success());
        assert_eq!(report.built.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].error, Error::MissingSourceFile(_)));
    }

    #[test]
    fn empty_variant_range_fails_without_panicking() {
        setup_logger();
        let root = test_root(function_name!());
        let input = root.path().join("Particles");
        let output = root.path().join("out");
        create_file(&input, "Smoke_1.png", "");

        let report = randomize_particles(&config(&["Smoke"], 3, 1), &input, &output);

        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].error, Error::InvalidConfig { .. }));
        assert!(report.built.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_directory_is_skipped() {
        let root = test_root(function_name!());
        let report = randomize_particles(&config(&["Smoke"], 0, 3), &root.path().join("nope"), &root.path().join("out"));
        assert_eq!(report.skipped.len(), 1);
        assert!(report.built.is_empty());
    }
}
