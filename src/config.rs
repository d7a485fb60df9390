//! Run options and persisted user settings.
//!
//! [`GenerateOptions`] is everything one batch needs and is passed in
//! explicitly. [`AppConfig`] is what survives between runs; loading and saving
//! it goes through a [`ConfigStore`] so callers decide where it lives.

use crate::build_config::DEFAULT_IMAGE_PATH;
use crate::color::Background;
use crate::error::{ConfigError, IconError, Result};
use crate::platform::{Platform, PlatformSet};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_ANDROID_SCALE: f64 = 0.8;
pub const DEFAULT_IOS_SCALE: f64 = 0.85;
pub const DEFAULT_DESKTOP_SCALE: f64 = 0.85;
pub const DEFAULT_APP_NAME: &str = "Flutter App";

const MIN_SCALE: f64 = 0.5;
const MAX_SCALE: f64 = 1.0;

/// Fraction of each canvas the content may cover, per platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentScales {
    pub android: f64,
    pub ios: f64,
    pub web: f64,
    pub windows: f64,
    pub macos: f64,
}

impl Default for ContentScales {
    fn default() -> Self {
        Self {
            android: DEFAULT_ANDROID_SCALE,
            ios: DEFAULT_IOS_SCALE,
            web: DEFAULT_DESKTOP_SCALE,
            windows: DEFAULT_DESKTOP_SCALE,
            macos: DEFAULT_DESKTOP_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub background: Background,
    pub scales: ContentScales,
    pub platforms: PlatformSet,
    /// Name written into the PWA manifest.
    pub app_name: String,
    /// Master image path recorded in the build-config document.
    pub image_path: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            background: Background::Transparent,
            scales: ContentScales::default(),
            platforms: PlatformSet::all(),
            app_name: DEFAULT_APP_NAME.to_string(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn scale_for(&self, platform: Platform) -> f64 {
        match platform {
            Platform::Android => self.scales.android,
            Platform::Ios => self.scales.ios,
            Platform::Web => self.scales.web,
            Platform::Windows => self.scales.windows,
            Platform::Macos => self.scales.macos,
        }
    }

    /// Reject an empty platform set or a content scale outside [0.5, 1.0].
    pub fn validate(&self) -> Result<()> {
        if self.platforms.is_empty() {
            return Err(IconError::EmptyPlatformSet);
        }
        for platform in Platform::ALL {
            let value = self.scale_for(platform);
            if !(MIN_SCALE..=MAX_SCALE).contains(&value) {
                return Err(IconError::InvalidScale { platform, value });
            }
        }
        Ok(())
    }
}

/// Settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub last_input_path: String,
    pub last_output_path: String,
    pub bg_color: String,
    pub use_transparent_bg: bool,
    pub android_scale: f64,
    pub ios_scale: f64,
    pub recent_files: Vec<String>,
    pub max_recent_files: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_input_path: String::new(),
            last_output_path: String::new(),
            bg_color: "#FFFFFF".to_string(),
            use_transparent_bg: false,
            android_scale: DEFAULT_ANDROID_SCALE,
            ios_scale: DEFAULT_IOS_SCALE,
            recent_files: Vec::new(),
            max_recent_files: 10,
        }
    }
}

impl AppConfig {
    /// Move `path` to the front of the recent list, dropping duplicates and overflow.
    pub fn add_recent_file(&mut self, path: &str) {
        self.recent_files.retain(|p| p != path);
        self.recent_files.insert(0, path.to_string());
        self.recent_files.truncate(self.max_recent_files);
    }

    /// Recent files that still exist on disk.
    pub fn existing_recent_files(&self) -> Vec<String> {
        self.recent_files
            .iter()
            .filter(|p| Path::new(p).exists())
            .cloned()
            .collect()
    }

    pub fn background(&self) -> Result<Background> {
        if self.use_transparent_bg {
            Ok(Background::Transparent)
        } else {
            self.bg_color.parse()
        }
    }

    /// Options for a run over `platforms` using these settings.
    pub fn to_options(&self, platforms: PlatformSet) -> Result<GenerateOptions> {
        Ok(GenerateOptions {
            background: self.background()?,
            scales: ContentScales {
                android: self.android_scale,
                ios: self.ios_scale,
                ..ContentScales::default()
            },
            platforms,
            ..GenerateOptions::default()
        })
    }
}

/// Load/save capability for [`AppConfig`].
pub trait ConfigStore {
    fn load(&self) -> Result<AppConfig, ConfigError>;
    fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;
}

/// `config.json` on disk.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/flutter_icon_generator/config.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(config_dir()?.join("config.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Per-user directory holding `config.json` and `user_templates.json`.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("flutter_icon_generator"))
        .ok_or(ConfigError::NoConfigDir)
}

impl ConfigStore for JsonConfigStore {
    /// A missing file yields defaults; so does an unreadable one, with a warning.
    fn load(&self) -> Result<AppConfig, ConfigError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&text) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Ok(AppConfig::default())
            }
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        write_json(&self.path, config)
    }
}

/// In-memory store, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    config: RefCell<Option<AppConfig>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        Ok(self.config.borrow().clone().unwrap_or_default())
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        *self.config.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)
}
