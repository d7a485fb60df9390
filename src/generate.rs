//! Walks a [`PlatformLayout`] and writes its files.
//!
//! Rendering never fails once the source is decoded; only encoding and
//! writing can, and those failures are recorded per file so the remaining
//! files still get written.

use crate::compose::{compose, flatten};
use crate::encode::{self, Raster};
use crate::error::{IconError, Result};
use crate::output::{write_file, AssetKind, PlatformReport};
use crate::platform::{FlattenPolicy, IconJob, PlatformLayout};
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Decode the source and force an alpha channel.
pub fn load_source(path: &Path) -> Result<RgbaImage> {
    let source = image::open(path).map_err(|source| IconError::SourceDecode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        width = source.width(),
        height = source.height(),
        "decoded source image"
    );
    Ok(source.to_rgba8())
}

/// Render one job to its final pixel format.
pub fn render(source: &RgbaImage, job: &IconJob) -> Raster {
    let budget = job.canvas.budget(job.content_scale);
    let canvas = compose(source, job.canvas, budget, job.background);

    match job.flatten {
        FlattenPolicy::Always => Raster::Rgb(flatten(&canvas, job.background.solid_or_white())),
        FlattenPolicy::Preserve if job.background.is_opaque() => {
            Raster::Rgb(DynamicImage::ImageRgba8(canvas).to_rgb8())
        }
        FlattenPolicy::Preserve => Raster::Rgba(canvas),
    }
}

/// Render and write every file of `layout` under `out_dir`.
pub fn generate_platform(layout: &PlatformLayout, source: &RgbaImage, out_dir: &Path) -> PlatformReport {
    let dir = out_dir.join(&layout.dir);
    let mut report = PlatformReport::new(layout.platform);
    info!(platform = %layout.platform, files = layout.file_count(), "generating");

    for job in &layout.icons {
        let path = dir.join(&job.file);
        let raster = render(source, job);
        let (width, height) = raster.dimensions();
        let result = raster
            .to_png()
            .map_err(|e| encode_error(&path, e))
            .and_then(|png| write_file(&path, &png));
        log_outcome(&path, &result);
        report.record(path, AssetKind::Image { width, height }, result);
    }

    for container in &layout.containers {
        let path = dir.join(&container.file);
        let frames: Vec<RgbaImage> = container
            .frames
            .iter()
            .map(|job| match render(source, job) {
                Raster::Rgba(img) => img,
                Raster::Rgb(img) => DynamicImage::ImageRgb8(img).to_rgba8(),
            })
            .collect();
        let sizes = container.frames.iter().map(|job| job.canvas.width).collect();
        let result = encode::to_ico(&frames)
            .map_err(|e| encode_error(&path, e))
            .and_then(|ico| write_file(&path, &ico));
        log_outcome(&path, &result);
        report.record(path, AssetKind::Icon { sizes }, result);
    }

    if let Some(metadata) = &layout.metadata {
        let path = dir.join(metadata.file_name());
        let result = metadata
            .to_json()
            .map_err(|e| IconError::Serialize {
                path: path.clone(),
                message: e.to_string(),
            })
            .and_then(|json| write_file(&path, json.as_bytes()));
        log_outcome(&path, &result);
        report.record(path, AssetKind::Metadata, result);
    }

    info!(
        platform = %layout.platform,
        written = report.assets.len(),
        failed = report.failures.len(),
        "platform done"
    );
    report
}

fn encode_error(path: &Path, source: image::ImageError) -> IconError {
    IconError::Encode {
        path: PathBuf::from(path),
        source,
    }
}

fn log_outcome(path: &Path, result: &Result<()>) {
    match result {
        Ok(()) => debug!(path = %path.display(), "wrote"),
        Err(e) => warn!(path = %path.display(), error = %e, "write failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Background;
    use crate::config::GenerateOptions;
    use crate::platform::Platform;
    use image::{Rgb, Rgba};
    use tempfile::TempDir;

    fn logo() -> RgbaImage {
        // Opaque disc on a transparent square.
        RgbaImage::from_fn(64, 64, |x, y| {
            let (dx, dy) = (x as i32 - 32, y as i32 - 32);
            if dx * dx + dy * dy < 28 * 28 {
                Rgba([220, 40, 40, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn test_render_always_flattens_to_white() {
        let job = IconJob::square("x.png", 40, 0.85, Background::Transparent, FlattenPolicy::Always);
        match render(&logo(), &job) {
            Raster::Rgb(img) => {
                assert_eq!(img.dimensions(), (40, 40));
                assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
            }
            other => panic!("expected RGB, got {other:?}"),
        }
    }

    #[test]
    fn test_render_preserve_keeps_alpha_only_when_transparent() {
        let transparent =
            IconJob::square("x.png", 48, 0.8, Background::Transparent, FlattenPolicy::Preserve);
        assert!(matches!(render(&logo(), &transparent), Raster::Rgba(_)));

        let solid = IconJob::square(
            "x.png",
            48,
            0.8,
            Background::Solid(Rgb([0, 0, 255])),
            FlattenPolicy::Preserve,
        );
        match render(&logo(), &solid) {
            Raster::Rgb(img) => assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 255])),
            other => panic!("expected RGB, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_platform_writes_layout() {
        let dir = TempDir::new().unwrap();
        let layout = Platform::Windows.layout(&GenerateOptions::default());
        let report = generate_platform(&layout, &logo(), dir.path());

        assert!(report.failures.is_empty(), "{:?}", report.failures);
        assert_eq!(report.assets.len(), 5);
        for asset in &report.assets {
            assert!(asset.path.exists(), "{} missing", asset.path.display());
        }
        let ico = report.assets.last().unwrap();
        assert_eq!(ico.kind, AssetKind::Icon { sizes: vec![16, 32, 48, 256] });
    }

    #[test]
    fn test_write_failure_does_not_stop_platform() {
        let dir = TempDir::new().unwrap();
        // A regular file where the xxhdpi folder should be.
        let android = dir.path().join("android");
        std::fs::create_dir_all(&android).unwrap();
        std::fs::write(android.join("mipmap-xxhdpi"), b"in the way").unwrap();

        let layout = Platform::Android.layout(&GenerateOptions::default());
        let report = generate_platform(&layout, &logo(), dir.path());

        assert_eq!(report.assets.len(), 6);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("mipmap-xxhdpi/ic_launcher.png"));
        assert!(android.join("mipmap-xxxhdpi").join("ic_launcher.png").exists());
    }

    #[test]
    fn test_load_source_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not-an-image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(load_source(&path), Err(IconError::SourceDecode { .. })));
        assert!(matches!(
            load_source(&dir.path().join("missing.png")),
            Err(IconError::SourceDecode { .. })
        ));
    }
}
