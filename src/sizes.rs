//! Per-platform icon size tables.

/// Android launcher density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndroidBucket {
    pub density: &'static str,
    pub size: u32,
}

pub const ANDROID_LAUNCHER: [AndroidBucket; 5] = [
    AndroidBucket { density: "mdpi", size: 48 },
    AndroidBucket { density: "hdpi", size: 72 },
    AndroidBucket { density: "xhdpi", size: 96 },
    AndroidBucket { density: "xxhdpi", size: 144 },
    AndroidBucket { density: "xxxhdpi", size: 192 },
];

/// Adaptive-icon foreground layer: always transparent, fixed safe-zone budget.
pub const ANDROID_FOREGROUND_SIZE: u32 = 432;
pub const ANDROID_FOREGROUND_SCALE: f64 = 0.75;

/// Play Store master icon.
pub const ANDROID_MASTER_SIZE: u32 = 1024;
pub const ANDROID_MASTER_SCALE: f64 = 0.9;

/// Asset catalog device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idiom {
    Iphone,
    Ipad,
    IosMarketing,
    Mac,
}

impl Idiom {
    pub fn as_str(self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
            Idiom::Mac => "mac",
        }
    }
}

/// One asset catalog icon: a logical size in points rendered at `density`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppleIcon {
    pub points: f32,
    pub density: u32,
    /// Idioms whose `Contents.json` entries reference this file.
    pub idioms: &'static [Idiom],
}

impl AppleIcon {
    const fn new(points: f32, density: u32, idioms: &'static [Idiom]) -> Self {
        Self {
            points,
            density,
            idioms,
        }
    }

    /// Rendered edge length in pixels.
    pub fn pixels(&self) -> u32 {
        (self.points * self.density as f32) as u32
    }

    /// Point size as written in file names and `Contents.json` ("20", "83.5").
    pub fn points_label(&self) -> String {
        if self.points.fract() == 0.0 {
            format!("{}", self.points as u32)
        } else {
            format!("{}", self.points)
        }
    }
}

const IPHONE: &[Idiom] = &[Idiom::Iphone];
const IPAD: &[Idiom] = &[Idiom::Ipad];
const UNIVERSAL: &[Idiom] = &[Idiom::Iphone, Idiom::Ipad];
const MARKETING: &[Idiom] = &[Idiom::IosMarketing];
const MAC: &[Idiom] = &[Idiom::Mac];

pub const IOS_ICONS: [AppleIcon; 15] = [
    AppleIcon::new(20.0, 1, IPAD),
    AppleIcon::new(20.0, 2, UNIVERSAL),
    AppleIcon::new(20.0, 3, IPHONE),
    AppleIcon::new(29.0, 1, IPAD),
    AppleIcon::new(29.0, 2, UNIVERSAL),
    AppleIcon::new(29.0, 3, IPHONE),
    AppleIcon::new(40.0, 1, IPAD),
    AppleIcon::new(40.0, 2, UNIVERSAL),
    AppleIcon::new(40.0, 3, IPHONE),
    AppleIcon::new(60.0, 2, IPHONE),
    AppleIcon::new(60.0, 3, IPHONE),
    AppleIcon::new(76.0, 1, IPAD),
    AppleIcon::new(76.0, 2, IPAD),
    AppleIcon::new(83.5, 2, IPAD),
    AppleIcon::new(1024.0, 1, MARKETING),
];

pub const MACOS_ICONS: [AppleIcon; 10] = [
    AppleIcon::new(16.0, 1, MAC),
    AppleIcon::new(16.0, 2, MAC),
    AppleIcon::new(32.0, 1, MAC),
    AppleIcon::new(32.0, 2, MAC),
    AppleIcon::new(128.0, 1, MAC),
    AppleIcon::new(128.0, 2, MAC),
    AppleIcon::new(256.0, 1, MAC),
    AppleIcon::new(256.0, 2, MAC),
    AppleIcon::new(512.0, 1, MAC),
    AppleIcon::new(512.0, 2, MAC),
];

/// PWA icon sizes, also the manifest's icon list.
pub const WEB_SIZES: [u32; 8] = [72, 96, 128, 144, 152, 192, 384, 512];

/// Frames bundled into `favicon.ico`.
pub const FAVICON_SIZES: [u32; 3] = [16, 32, 48];

/// Individual PNGs and `app_icon.ico` frames.
pub const WINDOWS_SIZES: [u32; 4] = [16, 32, 48, 256];
