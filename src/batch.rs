//! Whole-run orchestration: validate, decode once, generate each selected
//! platform, then write the build-config document.

use crate::build_config::{BuildConfig, BUILD_CONFIG_FILE};
use crate::config::GenerateOptions;
use crate::error::{IconError, Result};
use crate::generate::{generate_platform, load_source};
use crate::output::{write_file, BatchReport, WriteFailure};
use image::RgbaImage;
use std::path::Path;
use tracing::info;

/// Generate every selected platform from the image at `source_path` into `out_dir`.
///
/// Invalid options and an undecodable source fail before anything is written.
/// After that, individual write failures are collected in the report.
pub fn generate_all(source_path: &Path, out_dir: &Path, options: &GenerateOptions) -> Result<BatchReport> {
    options.validate()?;
    let source = load_source(source_path)?;
    generate_from_image(&source, out_dir, options)
}

/// Same as [`generate_all`] for an already decoded source.
pub fn generate_from_image(
    source: &RgbaImage,
    out_dir: &Path,
    options: &GenerateOptions,
) -> Result<BatchReport> {
    options.validate()?;
    info!(
        out_dir = %out_dir.display(),
        platforms = options.platforms.len(),
        background = %options.background,
        "starting batch"
    );

    let platforms = options
        .platforms
        .iter()
        .map(|platform| generate_platform(&platform.layout(options), source, out_dir))
        .collect();

    let mut report = BatchReport {
        platforms,
        build_config: None,
        failures: Vec::new(),
    };

    let path = out_dir.join(BUILD_CONFIG_FILE);
    let written = BuildConfig::new(&options.platforms, &options.image_path, options.background)
        .to_yaml()
        .map_err(|e| IconError::Serialize {
            path: path.clone(),
            message: e.to_string(),
        })
        .and_then(|yaml| write_file(&path, yaml.as_bytes()));
    match written {
        Ok(()) => report.build_config = Some(path),
        Err(error) => report.failures.push(WriteFailure {
            platform: None,
            path,
            error,
        }),
    }

    info!(
        written = report.total_written(),
        failed = report.all_failures().count(),
        "batch done"
    );
    Ok(report)
}
