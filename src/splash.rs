//! Android 12 splash-screen assets.
//!
//! Android 12 masks the splash icon to a circle, so the content budget is the
//! circle's diameter rather than a fraction of the canvas. The branding image
//! is a fixed 800x320 strip the content is fitted into whole.

use crate::color::Background;
use crate::compose::{compose, CanvasSpec, ContentBudget};
use crate::encode::Raster;
use crate::error::{IconError, Result};
use crate::output::{write_file, AssetKind, GeneratedAsset};
use image::RgbaImage;
use std::path::Path;
use tracing::debug;

pub const SPLASH_PREFIX: &str = "android12_splash_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashAsset {
    pub name: &'static str,
    pub canvas: CanvasSpec,
    pub budget: ContentBudget,
}

pub const SPLASH_ASSETS: [SplashAsset; 3] = [
    // Icon without an icon background: 1152 canvas, 768 safe circle.
    SplashAsset {
        name: "icon_no_bg_1152.png",
        canvas: CanvasSpec::square(1152),
        budget: ContentBudget::new(768, 768),
    },
    // Icon with an icon background: 960 canvas, 640 safe circle.
    SplashAsset {
        name: "icon_with_bg_960.png",
        canvas: CanvasSpec::square(960),
        budget: ContentBudget::new(640, 640),
    },
    SplashAsset {
        name: "branding_800x320.png",
        canvas: CanvasSpec::new(800, 320),
        budget: ContentBudget::new(800, 320),
    },
];

/// Write the three splash PNGs (transparent backgrounds) into `out_dir`.
///
/// Stops at the first write failure.
pub fn generate_splash(source: &RgbaImage, out_dir: &Path) -> Result<Vec<GeneratedAsset>> {
    SPLASH_ASSETS
        .iter()
        .map(|asset| {
            let path = out_dir.join(format!("{SPLASH_PREFIX}{}", asset.name));
            let raster = Raster::Rgba(compose(source, asset.canvas, asset.budget, Background::Transparent));
            let png = raster.to_png().map_err(|source| IconError::Encode {
                path: path.clone(),
                source,
            })?;
            write_file(&path, &png)?;
            debug!(path = %path.display(), "wrote splash asset");
            Ok(GeneratedAsset {
                path,
                kind: AssetKind::Image {
                    width: asset.canvas.width,
                    height: asset.canvas.height,
                },
            })
        })
        .collect()
}
