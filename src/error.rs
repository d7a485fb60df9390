//! Error types shared by the library.

use crate::platform::Platform;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("invalid color format: {0:?} (expected 6 hex digits, optionally prefixed with '#')")]
    InvalidColorFormat(String),

    #[error("{platform} content scale {value} is outside [0.5, 1.0]")]
    InvalidScale { platform: Platform, value: f64 },

    #[error("at least one platform must be selected")]
    EmptyPlatformSet,

    #[error("failed to decode source image {}", path.display())]
    SourceDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to serialize {}: {message}", path.display())]
    Serialize { path: PathBuf, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config JSON error at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no configuration directory available on this system")]
    NoConfigDir,
}

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("build tool is not installed or not on PATH")]
    NotAvailable,
    #[error("{} is not a Flutter project (no pubspec.yaml)", .0.display())]
    NotProject(PathBuf),
    #[error("failed to launch build tool: {0}")]
    Launch(String),
    #[error("build tool timed out after {0:?}")]
    TimedOut(std::time::Duration),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = IconError> = std::result::Result<T, E>;
