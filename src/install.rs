//! Copy generated platform trees into a Flutter project.

use crate::platform::{Platform, PlatformSet};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Where each platform's output folder lands inside a Flutter project.
pub fn project_dir(platform: Platform) -> PathBuf {
    let rel = match platform {
        Platform::Android => "android/app/src/main/res",
        Platform::Ios => "ios/Runner/Assets.xcassets/AppIcon.appiconset",
        Platform::Web => "web/icons",
        Platform::Windows => "windows/runner/resources",
        Platform::Macos => "macos/Runner/Assets.xcassets/AppIcon.appiconset",
    };
    rel.split('/').collect()
}

/// Folder under the generated output whose contents are copied for `platform`.
///
/// Android keeps its mipmap tree; the others are flat asset folders.
fn source_dir(platform: Platform) -> PathBuf {
    match platform {
        Platform::Android => platform.root_dir(),
        _ => platform.asset_dir(),
    }
}

/// Copy each platform's generated files into `project`, overwriting files with
/// the same name and leaving everything else in place.
///
/// Returns per-platform success; a platform with no generated output is `false`.
pub fn copy_to_project(
    generated: &Path,
    project: &Path,
    platforms: &PlatformSet,
) -> BTreeMap<Platform, bool> {
    platforms
        .iter()
        .map(|platform| {
            let from = generated.join(source_dir(platform));
            let to = project.join(project_dir(platform));
            let ok = if from.is_dir() {
                match copy_tree(&from, &to) {
                    Ok(count) => {
                        debug!(%platform, files = count, to = %to.display(), "copied");
                        true
                    }
                    Err(e) => {
                        warn!(%platform, error = %e, "copy failed");
                        false
                    }
                }
            } else {
                false
            };
            (platform, ok)
        })
        .collect()
}

fn copy_tree(from: &Path, to: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(std::io::Error::from)?;
        let rel = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, text: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn test_copy_maps_directories_and_keeps_unrelated_files() {
        let generated = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        touch(&generated.path().join("android/mipmap-mdpi/ic_launcher.png"), "new");
        touch(&generated.path().join("ios/AppIcon.appiconset/Contents.json"), "{}");
        touch(&project.path().join("android/app/src/main/res/mipmap-mdpi/ic_launcher.png"), "old");
        touch(&project.path().join("android/app/src/main/res/values/strings.xml"), "keep");

        let platforms: PlatformSet = [Platform::Android, Platform::Ios, Platform::Web]
            .into_iter()
            .collect();
        let results = copy_to_project(generated.path(), project.path(), &platforms);

        assert!(results[&Platform::Android]);
        assert!(results[&Platform::Ios]);
        assert!(!results[&Platform::Web]);

        let res = project.path().join("android/app/src/main/res");
        assert_eq!(std::fs::read_to_string(res.join("mipmap-mdpi/ic_launcher.png")).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(res.join("values/strings.xml")).unwrap(), "keep");
        assert!(project
            .path()
            .join("ios/Runner/Assets.xcassets/AppIcon.appiconset/Contents.json")
            .is_file());
    }
}
