//! Centered scale-and-paste compositing.
//!
//! Every raster this crate writes comes out of [`compose`]: allocate a canvas,
//! shrink the source until it fits the content budget (never enlarging it),
//! center it with floor rounding, and alpha-blend it onto the background.
//!
//! The geometry lives in pure functions ([`fit_within`], [`center_offset`])
//! so it can be checked without touching pixels.

use crate::color::Background;
use image::{
    imageops::{self, FilterType},
    DynamicImage, Rgb, RgbImage, Rgba, RgbaImage,
};

/// Output raster dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
}

impl CanvasSpec {
    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Budget covering `fraction` of the canvas on each axis, floored.
    pub fn budget(self, fraction: f64) -> ContentBudget {
        ContentBudget {
            max_width: (self.width as f64 * fraction).floor() as u32,
            max_height: (self.height as f64 * fraction).floor() as u32,
        }
    }
}

/// Bounding box the resampled source must fit inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBudget {
    pub max_width: u32,
    pub max_height: u32,
}

impl ContentBudget {
    pub const fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

/// Size of the source after fitting it inside `budget` with its aspect ratio intact.
///
/// The scale is `min(bw / sw, bh / sh, 1)`, picked by cross-multiplying so the
/// limiting side lands on the budget exactly instead of one float ulp below it.
/// Both sides are floored and clamped to at least one pixel.
pub fn fit_within(source: (u32, u32), budget: ContentBudget) -> (u32, u32) {
    let (sw, sh) = (source.0.max(1) as u64, source.1.max(1) as u64);
    let (bw, bh) = (budget.max_width as u64, budget.max_height as u64);

    // Candidate ratios as (numerator, denominator).
    let mut scale = (1u64, 1u64);
    for candidate in [(bw, sw), (bh, sh)] {
        if candidate.0 * scale.1 < scale.0 * candidate.1 {
            scale = candidate;
        }
    }

    let (num, den) = scale;
    let width = (sw * num / den).max(1) as u32;
    let height = (sh * num / den).max(1) as u32;
    (width, height)
}

/// Top-left paste position that centers `content` on `canvas`, biased toward
/// the top-left by at most one pixel.
pub fn center_offset(canvas: CanvasSpec, content: (u32, u32)) -> (i64, i64) {
    let x = (canvas.width as i64 - content.0 as i64).div_euclid(2);
    let y = (canvas.height as i64 - content.1 as i64).div_euclid(2);
    (x, y)
}

/// Render `source` centered inside `canvas`, fitted to `budget`, over `background`.
///
/// The result always has exactly the canvas dimensions. Source pixels are
/// blended through their own alpha, so transparent regions of the source keep
/// the background visible.
pub fn compose(
    source: &RgbaImage,
    canvas: CanvasSpec,
    budget: ContentBudget,
    background: Background,
) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(canvas.width, canvas.height, background.fill());

    let (width, height) = fit_within(source.dimensions(), budget);
    let content = if (width, height) == source.dimensions() {
        source.clone()
    } else {
        imageops::resize(source, width, height, FilterType::Lanczos3)
    };

    let (x, y) = center_offset(canvas, (width, height));
    imageops::overlay(&mut out, &content, x, y);
    out
}

/// Composite `image` over an opaque `color`, dropping the alpha channel.
pub fn flatten(image: &RgbaImage, color: Rgb<u8>) -> RgbImage {
    let [r, g, b] = color.0;
    let mut base = RgbaImage::from_pixel(image.width(), image.height(), Rgba([r, g, b, 255]));
    imageops::overlay(&mut base, image, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}
