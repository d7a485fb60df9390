//! Records of what a run wrote, and the write primitive behind them.

use crate::error::IconError;
use crate::platform::Platform;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    /// Single raster.
    Image { width: u32, height: u32 },
    /// Multi-resolution `.ico` holding the listed square sizes.
    Icon { sizes: Vec<u32> },
    /// JSON/YAML descriptor.
    Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub path: PathBuf,
    pub kind: AssetKind,
}

impl GeneratedAsset {
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self.kind {
            AssetKind::Image { width, height } => Some((width, height)),
            _ => None,
        }
    }
}

/// A file that could not be written. The rest of the batch carries on.
#[derive(Debug)]
pub struct WriteFailure {
    pub platform: Option<Platform>,
    pub path: PathBuf,
    pub error: IconError,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.platform {
            Some(platform) => write!(f, "[{platform}] {}", self.path.display())?,
            None => write!(f, "{}", self.path.display())?,
        }
        let mut source: Option<&dyn std::error::Error> = Some(&self.error);
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct PlatformReport {
    pub platform: Platform,
    pub assets: Vec<GeneratedAsset>,
    pub failures: Vec<WriteFailure>,
}

impl PlatformReport {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            assets: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Record the outcome of writing one file.
    pub(crate) fn record(&mut self, path: PathBuf, kind: AssetKind, result: Result<(), IconError>) {
        match result {
            Ok(()) => self.assets.push(GeneratedAsset { path, kind }),
            Err(error) => self.failures.push(WriteFailure {
                platform: Some(self.platform),
                path,
                error,
            }),
        }
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub platforms: Vec<PlatformReport>,
    /// The build-config document, when it was written.
    pub build_config: Option<PathBuf>,
    /// Failures not tied to a platform.
    pub failures: Vec<WriteFailure>,
}

impl BatchReport {
    pub fn platform(&self, platform: Platform) -> Option<&PlatformReport> {
        self.platforms.iter().find(|r| r.platform == platform)
    }

    pub fn assets(&self) -> impl Iterator<Item = &GeneratedAsset> {
        self.platforms.iter().flat_map(|r| r.assets.iter())
    }

    pub fn all_failures(&self) -> impl Iterator<Item = &WriteFailure> {
        self.platforms
            .iter()
            .flat_map(|r| r.failures.iter())
            .chain(self.failures.iter())
    }

    /// Files written, including the build-config document.
    pub fn total_written(&self) -> usize {
        self.assets().count() + usize::from(self.build_config.is_some())
    }

    pub fn is_complete(&self) -> bool {
        self.all_failures().next().is_none()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.platforms {
            writeln!(f, "{}: {} files", report.platform, report.assets.len())?;
        }
        if let Some(path) = &self.build_config {
            writeln!(f, "build config: {}", path.display())?;
        }
        write!(f, "{} files written", self.total_written())?;

        let failed: Vec<&WriteFailure> = self.all_failures().collect();
        if !failed.is_empty() {
            write!(f, ", {} failed:", failed.len())?;
            for failure in failed {
                write!(f, "\n  {failure}")?;
            }
        }
        Ok(())
    }
}

/// Write `bytes` to `path`, creating parent directories. Existing files are overwritten.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), IconError> {
    let io_err = |source| IconError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, bytes).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("c.txt");
        write_file(&path, b"first").unwrap();
        write_file(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_write_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a dir").unwrap();

        let target = blocker.join("icon.png");
        match write_file(&target, b"x") {
            Err(IconError::OutputWrite { path, .. }) => assert_eq!(path, target),
            other => panic!("expected OutputWrite, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_lists_failures() {
        let mut android = PlatformReport::new(Platform::Android);
        android.record(
            PathBuf::from("android/ic_launcher.png"),
            AssetKind::Image {
                width: 48,
                height: 48,
            },
            Ok(()),
        );
        android.record(
            PathBuf::from("android/broken.png"),
            AssetKind::Metadata,
            Err(IconError::OutputWrite {
                path: PathBuf::from("android/broken.png"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
        );

        let report = BatchReport {
            platforms: vec![android],
            build_config: Some(PathBuf::from("flutter_launcher_icons.yaml")),
            failures: Vec::new(),
        };

        assert_eq!(report.total_written(), 2);
        assert!(!report.is_complete());
        let summary = report.to_string();
        assert!(summary.contains("android: 1 files"));
        assert!(summary.contains("2 files written, 1 failed:"));
        assert!(summary.contains("[android] android/broken.png"));
        assert!(summary.contains("denied"));
    }
}
