//! PWA `manifest.json` emitter.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// File name of a PWA icon, e.g. `icon-192x192.png`.
pub fn web_icon_filename(size: u32) -> String {
    format!("icon-{size}x{size}.png")
}

impl WebManifest {
    /// Manifest listing one PNG per entry in `sizes`; `theme` doubles as the
    /// background color.
    pub fn new(app_name: &str, theme: &str, sizes: &[u32]) -> Self {
        Self {
            name: app_name.to_string(),
            short_name: app_name.to_string(),
            start_url: ".".to_string(),
            display: "standalone".to_string(),
            background_color: theme.to_string(),
            theme_color: theme.to_string(),
            icons: sizes
                .iter()
                .map(|&size| ManifestIcon {
                    src: web_icon_filename(size),
                    sizes: format!("{size}x{size}"),
                    mime_type: "image/png".to_string(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
