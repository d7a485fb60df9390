//! Declarative per-platform layouts.
//!
//! Each [`Platform`] expands into a [`PlatformLayout`]: the rasters to render,
//! the multi-resolution containers to bundle and the metadata document to
//! write. The generator in [`crate::generate`] walks any layout the same way,
//! so size tables and naming conventions stay data.

use crate::color::{self, Background};
use crate::compose::CanvasSpec;
use crate::config::GenerateOptions;
use crate::contents_json::{self, ContentsFile};
use crate::manifest::{self, WebManifest};
use crate::sizes::{
    ANDROID_FOREGROUND_SCALE, ANDROID_FOREGROUND_SIZE, ANDROID_LAUNCHER, ANDROID_MASTER_SCALE,
    ANDROID_MASTER_SIZE, FAVICON_SIZES, IOS_ICONS, MACOS_ICONS, WEB_SIZES, WINDOWS_SIZES,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
    Windows,
    Macos,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Android,
        Platform::Ios,
        Platform::Web,
        Platform::Windows,
        Platform::Macos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
            Platform::Windows => "windows",
            Platform::Macos => "macos",
        }
    }

    /// Top-level folder for this platform under the output root.
    pub fn root_dir(self) -> PathBuf {
        PathBuf::from(self.as_str())
    }

    /// Folder, relative to the output root, that receives the assets.
    pub fn asset_dir(self) -> PathBuf {
        match self {
            Platform::Ios => self.root_dir().join("AppIcon.appiconset"),
            Platform::Macos => self
                .root_dir()
                .join("Runner")
                .join("Assets.xcassets")
                .join("AppIcon.appiconset"),
            _ => self.root_dir(),
        }
    }

    pub fn layout(self, options: &GenerateOptions) -> PlatformLayout {
        let scale = options.scale_for(self);
        let background = options.background;

        let mut layout = PlatformLayout {
            platform: self,
            dir: self.asset_dir(),
            icons: Vec::new(),
            containers: Vec::new(),
            metadata: None,
        };

        match self {
            Platform::Android => {
                for bucket in ANDROID_LAUNCHER {
                    layout.icons.push(IconJob::square(
                        PathBuf::from(format!("mipmap-{}", bucket.density)).join("ic_launcher.png"),
                        bucket.size,
                        scale,
                        background,
                        FlattenPolicy::Preserve,
                    ));
                }
                layout.icons.push(IconJob::square(
                    "ic_launcher_foreground.png",
                    ANDROID_FOREGROUND_SIZE,
                    ANDROID_FOREGROUND_SCALE,
                    Background::Transparent,
                    FlattenPolicy::Preserve,
                ));
                layout.icons.push(IconJob::square(
                    format!("ic_launcher_{ANDROID_MASTER_SIZE}x{ANDROID_MASTER_SIZE}.png"),
                    ANDROID_MASTER_SIZE,
                    ANDROID_MASTER_SCALE,
                    background,
                    FlattenPolicy::Preserve,
                ));
            }
            Platform::Ios => {
                for icon in IOS_ICONS.iter() {
                    layout.icons.push(IconJob::square(
                        contents_json::ios_filename(icon),
                        icon.pixels(),
                        scale,
                        background,
                        FlattenPolicy::Always,
                    ));
                }
                layout.metadata = Some(Metadata::AppleContents(contents_json::ios_contents()));
            }
            Platform::Web => {
                layout.containers.push(IconContainer {
                    file: PathBuf::from("favicon.ico"),
                    frames: FAVICON_SIZES
                        .iter()
                        .map(|&size| {
                            IconJob::square("", size, scale, background, FlattenPolicy::Always)
                        })
                        .collect(),
                });
                for size in WEB_SIZES {
                    layout.icons.push(IconJob::square(
                        manifest::web_icon_filename(size),
                        size,
                        scale,
                        background,
                        FlattenPolicy::Preserve,
                    ));
                }
                let theme = color::to_hex(background.solid_or_white());
                layout.metadata = Some(Metadata::WebManifest(WebManifest::new(
                    &options.app_name,
                    &theme,
                    &WEB_SIZES,
                )));
            }
            Platform::Windows => {
                let jobs: Vec<IconJob> = WINDOWS_SIZES
                    .iter()
                    .map(|&size| {
                        IconJob::square(
                            format!("app_icon_{size}.png"),
                            size,
                            scale,
                            background,
                            FlattenPolicy::Always,
                        )
                    })
                    .collect();
                layout.containers.push(IconContainer {
                    file: PathBuf::from("app_icon.ico"),
                    frames: jobs.clone(),
                });
                layout.icons = jobs;
            }
            Platform::Macos => {
                for icon in MACOS_ICONS.iter() {
                    layout.icons.push(IconJob::square(
                        contents_json::macos_filename(icon),
                        icon.pixels(),
                        scale,
                        background,
                        FlattenPolicy::Always,
                    ));
                }
                layout.metadata = Some(Metadata::AppleContents(contents_json::macos_contents()));
            }
        }

        layout
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}

/// Ordered, de-duplicated selection of platforms.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformSet(BTreeSet<Platform>);

impl PlatformSet {
    pub fn all() -> Self {
        Platform::ALL.into_iter().collect()
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains(&platform)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<T: IntoIterator<Item = Platform>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether the written raster may keep an alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenPolicy {
    /// Keep alpha when the background is transparent; opaque backgrounds are written as RGB.
    Preserve,
    /// Always composite over the background color (white when transparent) and write RGB.
    Always,
}

/// One raster to render.
#[derive(Debug, Clone, PartialEq)]
pub struct IconJob {
    /// Path relative to the platform's asset directory.
    pub file: PathBuf,
    pub canvas: CanvasSpec,
    /// Fraction of the canvas the content may occupy on each axis.
    pub content_scale: f64,
    pub background: Background,
    pub flatten: FlattenPolicy,
}

impl IconJob {
    pub fn square(
        file: impl Into<PathBuf>,
        size: u32,
        content_scale: f64,
        background: Background,
        flatten: FlattenPolicy,
    ) -> Self {
        Self {
            file: file.into(),
            canvas: CanvasSpec::square(size),
            content_scale,
            background,
            flatten,
        }
    }
}

/// Multi-resolution `.ico` bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct IconContainer {
    pub file: PathBuf,
    pub frames: Vec<IconJob>,
}

/// Descriptor document a platform's build system reads.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    AppleContents(ContentsFile),
    WebManifest(WebManifest),
}

impl Metadata {
    pub fn file_name(&self) -> &'static str {
        match self {
            Metadata::AppleContents(_) => "Contents.json",
            Metadata::WebManifest(_) => "manifest.json",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Metadata::AppleContents(contents) => contents.to_json(),
            Metadata::WebManifest(manifest) => manifest.to_json(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformLayout {
    pub platform: Platform,
    /// Asset directory relative to the output root.
    pub dir: PathBuf,
    pub icons: Vec<IconJob>,
    pub containers: Vec<IconContainer>,
    pub metadata: Option<Metadata>,
}

impl PlatformLayout {
    /// Number of files a successful run writes.
    pub fn file_count(&self) -> usize {
        self.icons.len() + self.containers.len() + usize::from(self.metadata.is_some())
    }
}
