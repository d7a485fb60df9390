//! `Contents.json` index for Xcode asset catalogs.
//!
//! The same envelope serves the iOS `AppIcon.appiconset` and the macOS
//! `Runner/Assets.xcassets/AppIcon.appiconset` written by the generators.

use crate::sizes::{AppleIcon, Idiom, IOS_ICONS, MACOS_ICONS};
use serde::Serialize;

/// Author recorded in the `info` block, matching catalogs created by Xcode.
pub const CATALOG_AUTHOR: &str = "xcode";

/// One `Contents.json` document.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContentsFile {
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

/// Image slot in the catalog.
///
/// Field order follows the catalogs Xcode writes: size, idiom, filename, scale.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// Points, e.g. `83.5x83.5`.
    pub size: String,
    pub idiom: String,
    pub filename: String,
    /// Density multiplier, `1x` to `3x`.
    pub scale: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Info {
    pub author: String,
    /// Always 1.
    pub version: u8,
}

impl ContentsFile {
    /// Empty index attributed to `author`.
    pub fn new(author: &str) -> Self {
        Self {
            images: Vec::new(),
            info: Info {
                author: author.to_string(),
                version: 1,
            },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl ImageEntry {
    /// Creates the catalog entry for `icon` stored as `filename` under `idiom`.
    pub fn for_icon(icon: &AppleIcon, idiom: Idiom, filename: String) -> Self {
        let points = icon.points_label();
        Self {
            size: format!("{points}x{points}"),
            idiom: idiom.as_str().to_string(),
            filename,
            scale: format!("{}x", icon.density),
        }
    }
}

/// File name of an iOS icon, e.g. `Icon-App-83.5x83.5@2x.png`.
pub fn ios_filename(icon: &AppleIcon) -> String {
    let points = icon.points_label();
    format!("Icon-App-{points}x{points}@{}x.png", icon.density)
}

/// File name of a macOS icon, e.g. `app_icon_32x32@2x.png`.
pub fn macos_filename(icon: &AppleIcon) -> String {
    let points = icon.points_label();
    let suffix = if icon.density == 2 { "@2x" } else { "" };
    format!("app_icon_{points}x{points}{suffix}.png")
}

/// Build an index grouped by idiom: every entry for the first idiom, then the next.
///
/// A file shared by several idioms (the 2x iPhone/iPad sizes) appears once per idiom.
pub fn build_contents(
    table: &[AppleIcon],
    idioms: &[Idiom],
    filename: impl Fn(&AppleIcon) -> String,
) -> ContentsFile {
    let mut contents = ContentsFile::new(CATALOG_AUTHOR);
    for &idiom in idioms {
        for icon in table.iter().filter(|icon| icon.idioms.contains(&idiom)) {
            contents.add_image(ImageEntry::for_icon(icon, idiom, filename(icon)));
        }
    }
    contents
}

pub fn ios_contents() -> ContentsFile {
    build_contents(
        &IOS_ICONS,
        &[Idiom::Iphone, Idiom::Ipad, Idiom::IosMarketing],
        ios_filename,
    )
}

pub fn macos_contents() -> ContentsFile {
    build_contents(&MACOS_ICONS, &[Idiom::Mac], macos_filename)
}
