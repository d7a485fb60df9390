//! Launcher icon sets for Flutter's Android, iOS, Web, Windows and macOS
//! targets, composited from a single source image.
//!
//! ```no_run
//! use flutter_icon_gen::{generate_all, GenerateOptions};
//! use std::path::Path;
//!
//! let options = GenerateOptions {
//!     background: "#0078D4".parse()?,
//!     ..GenerateOptions::default()
//! };
//! let report = generate_all(Path::new("logo.png"), Path::new("icons"), &options)?;
//! println!("{report}");
//! # Ok::<(), flutter_icon_gen::IconError>(())
//! ```

pub mod batch;
pub mod build_config;
pub mod color;
pub mod compose;
pub mod config;
pub mod contents_json;
pub mod encode;
pub mod error;
pub mod generate;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod platform;
pub mod sizes;
pub mod splash;
pub mod templates;
pub mod toolchain;

pub use batch::{generate_all, generate_from_image};
pub use color::{parse_hex_color, Background};
pub use compose::{compose, CanvasSpec, ContentBudget};
pub use config::{AppConfig, ConfigStore, ContentScales, GenerateOptions, JsonConfigStore};
pub use error::{IconError, Result};
pub use output::{AssetKind, BatchReport, GeneratedAsset, PlatformReport, WriteFailure};
pub use platform::{Platform, PlatformSet};
