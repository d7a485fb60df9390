//! Named presets bundling a background and mobile content scales.

use crate::config::{self, AppConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const USER_TEMPLATES_FILE: &str = "user_templates.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub bg_color: String,
    pub use_transparent_bg: bool,
    pub android_scale: f64,
    pub ios_scale: f64,
}

impl Template {
    /// Copy this preset's values into `config`.
    pub fn apply_to(&self, config: &mut AppConfig) {
        config.bg_color = self.bg_color.clone();
        config.use_transparent_bg = self.use_transparent_bg;
        config.android_scale = self.android_scale;
        config.ios_scale = self.ios_scale;
    }
}

// id, name, description, bg_color, transparent, android, ios
const BUILT_IN: [(&str, &str, &str, &str, bool, f64, f64); 14] = [
    ("default", "Default", "Recommended standard settings", "#FFFFFF", false, 0.8, 0.85),
    ("material", "Material Design", "Tuned for Material Design on Android", "#FFFFFF", false, 0.72, 0.85),
    ("ios_rounded", "iOS Rounded", "Tuned for rounded iOS icons", "#FFFFFF", false, 0.8, 0.78),
    ("adaptive", "Android Adaptive", "Focus on Android 8+ adaptive icons", "#FFFFFF", true, 0.75, 0.85),
    ("dark", "Dark Theme", "Dark background for light logos", "#1A1A1A", false, 0.8, 0.85),
    ("brand", "Corporate Brand", "Wide margins for logos with text", "#FFFFFF", false, 0.65, 0.70),
    ("web_pwa", "Web / PWA", "Tuned for web apps and PWAs", "#FFFFFF", false, 0.85, 0.88),
    ("web_transparent", "Transparent Web", "Transparent background for favicon and PWA", "#FFFFFF", true, 0.9, 0.9),
    ("windows_metro", "Windows Metro", "Windows 10/11 modern UI style", "#0078D4", false, 0.82, 0.85),
    ("macos_big_sur", "macOS Big Sur", "macOS Big Sur style with rounded corners", "#F5F5F7", false, 0.8, 0.75),
    ("gradient_ready", "Gradient Ready", "Large logo without background for gradients", "#FFFFFF", true, 0.6, 0.65),
    ("minimal", "Minimal", "Extra large margins for minimal designs", "#FFFFFF", false, 0.55, 0.60),
    ("gaming", "Gaming", "Dark background with a large logo", "#0D0D0D", false, 0.88, 0.88),
    ("social", "Social", "Tuned for social apps", "#000000", false, 0.82, 0.82),
];

pub fn built_in() -> BTreeMap<String, Template> {
    BUILT_IN
        .iter()
        .map(|&(id, name, description, bg, transparent, android, ios)| {
            (
                id.to_string(),
                Template {
                    name: name.to_string(),
                    description: description.to_string(),
                    bg_color: bg.to_string(),
                    use_transparent_bg: transparent,
                    android_scale: android,
                    ios_scale: ios,
                },
            )
        })
        .collect()
}

fn is_built_in(id: &str) -> bool {
    BUILT_IN.iter().any(|t| t.0 == id)
}

/// Built-in presets merged with the user's own, which may override them.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, Template>,
    user_file: Option<PathBuf>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self {
            templates: built_in(),
            user_file: None,
        }
    }
}

impl TemplateRegistry {
    /// Load built-ins plus `user_file` if it exists. An unreadable file is skipped with a warning.
    pub fn load(user_file: impl Into<PathBuf>) -> Self {
        let user_file = user_file.into();
        let mut registry = Self {
            templates: built_in(),
            user_file: Some(user_file.clone()),
        };

        match read_user_templates(&user_file) {
            Ok(user) => registry.templates.extend(user),
            Err(e) => warn!(error = %e, "skipping user templates"),
        }
        registry
    }

    /// Registry backed by `user_templates.json` in the config directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        Ok(Self::load(config::config_dir()?.join(USER_TEMPLATES_FILE)))
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Add or replace a template and persist every non-built-in one.
    pub fn save_user_template(&mut self, id: &str, template: Template) -> Result<(), ConfigError> {
        self.templates.insert(id.to_string(), template);

        let Some(path) = &self.user_file else {
            return Ok(());
        };
        let user: BTreeMap<&String, &Template> = self
            .templates
            .iter()
            .filter(|(id, _)| !is_built_in(id))
            .collect();
        config::write_json(path, &user)
    }

    /// Apply template `id` to `config`; false when no such template exists.
    pub fn apply(&self, id: &str, config: &mut AppConfig) -> bool {
        match self.get(id) {
            Some(template) => {
                template.apply_to(config);
                true
            }
            None => false,
        }
    }
}

fn read_user_templates(path: &Path) -> Result<BTreeMap<String, Template>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
