//! `flutter_launcher_icons.yaml` emitter.
//!
//! The document lets a Flutter project's own icon step regenerate the icons
//! from the master image; it is written for every run regardless of which
//! platforms were rendered.

use crate::color::{self, Background};
use crate::platform::{Platform, PlatformSet};
use serde::Serialize;

pub const BUILD_CONFIG_FILE: &str = "flutter_launcher_icons.yaml";

/// Suggested location of the master image inside a Flutter project.
pub const DEFAULT_IMAGE_PATH: &str = "assets/icon/icon.png";

const MIN_SDK_ANDROID: u32 = 21;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub flutter_launcher_icons: LauncherIcons,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LauncherIcons {
    pub android: bool,
    pub ios: bool,
    pub web: bool,
    pub windows: bool,
    pub macos: bool,
    pub image_path: String,
    pub adaptive_icon_background: String,
    pub adaptive_icon_foreground: String,
    pub min_sdk_android: u32,
    pub remove_alpha_ios: bool,
}

impl BuildConfig {
    pub fn new(platforms: &PlatformSet, image_path: &str, background: Background) -> Self {
        Self {
            flutter_launcher_icons: LauncherIcons {
                android: platforms.contains(Platform::Android),
                ios: platforms.contains(Platform::Ios),
                web: platforms.contains(Platform::Web),
                windows: platforms.contains(Platform::Windows),
                macos: platforms.contains(Platform::Macos),
                image_path: image_path.to_string(),
                adaptive_icon_background: color::to_hex(background.solid_or_white()),
                adaptive_icon_foreground: image_path.to_string(),
                min_sdk_android: MIN_SDK_ANDROID,
                remove_alpha_ios: true,
            },
        }
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}
