//! PNG and ICO encoding.

use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, ImageEncoder, ImageResult, RgbImage, RgbaImage,
};

/// A finished raster, with or without an alpha channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    Rgba(RgbaImage),
    Rgb(RgbImage),
}

impl Raster {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Rgba(img) => img.dimensions(),
            Raster::Rgb(img) => img.dimensions(),
        }
    }

    pub fn to_png(&self) -> ImageResult<Vec<u8>> {
        let mut buf = Vec::new();
        let (width, height) = self.dimensions();
        match self {
            Raster::Rgba(img) => write_png(img.as_raw(), &mut buf, width, height, ColorType::Rgba8)?,
            Raster::Rgb(img) => write_png(img.as_raw(), &mut buf, width, height, ColorType::Rgb8)?,
        }
        Ok(buf)
    }
}

// Encode image data as PNG with compression
fn write_png<W: std::io::Write>(
    data: &[u8],
    w: W,
    width: u32,
    height: u32,
    color: ColorType,
) -> ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(data, width, height, color)
}

/// Bundle square RGBA frames into one `.ico`, each stored as an embedded PNG.
pub fn to_ico(frames: &[RgbaImage]) -> ImageResult<Vec<u8>> {
    let mut encoded = Vec::with_capacity(frames.len());
    for frame in frames {
        let mut buf = Vec::new();
        write_png(
            frame.as_raw(),
            &mut buf,
            frame.width(),
            frame.height(),
            ColorType::Rgba8,
        )?;
        encoded.push(IcoFrame::with_encoded(
            buf,
            frame.width(),
            frame.height(),
            ColorType::Rgba8,
        )?);
    }

    let mut out = Vec::new();
    IcoEncoder::new(&mut out).encode_images(&encoded)?;
    Ok(out)
}
