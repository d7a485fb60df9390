use image::{GenericImageView, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_flutter-icon-gen"))
}

fn create_dummy_source(path: &Path) {
    RgbaImage::from_pixel(1024, 1024, Rgba([30, 144, 255, 255]))
        .save(path)
        .expect("Failed to create dummy source");
}

/// Run the binary with an isolated settings file.
fn run(temp: &Path, args: &[&str]) -> Output {
    Command::new(binary())
        .args(args)
        .arg("--config")
        .arg(temp.join("settings.json"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run flutter-icon-gen")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("flutter-icon-gen failed with {}", output.status);
    }
}

#[test]
fn test_cli_android_and_web() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("logo.png");
    create_dummy_source(&source);
    let out = temp.path().join("out");

    let output = run(
        temp.path(),
        &[
            source.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--platforms",
            "android,web",
            "--background",
            "#FF8800",
        ],
    );
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("android: 7 files"), "{stdout}");
    assert!(stdout.contains("web: 10 files"), "{stdout}");

    let icon = image::open(out.join("android/mipmap-hdpi/ic_launcher.png")).unwrap();
    assert_eq!(icon.dimensions(), (72, 72));
    assert_eq!(icon.get_pixel(0, 0), Rgba([0xFF, 0x88, 0x00, 255]));
    assert!(out.join("web/manifest.json").is_file());
    assert!(out.join("flutter_launcher_icons.yaml").is_file());
    assert!(!out.join("ios").exists());
}

#[test]
fn test_cli_rejects_bad_color() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("logo.png");
    create_dummy_source(&source);
    let out = temp.path().join("out");

    let output = run(
        temp.path(),
        &[source.to_str().unwrap(), "-o", out.to_str().unwrap(), "--background", "#ZZZZZZ"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("#ZZZZZZ"));
    assert!(!out.exists());
}

#[test]
fn test_cli_rejects_missing_source() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let missing = temp.path().join("missing.png");

    let output = run(temp.path(), &[missing.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn test_cli_template_and_saved_settings() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("logo.png");
    create_dummy_source(&source);
    let out = temp.path().join("out");

    let output = run(
        temp.path(),
        &[
            source.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--platforms",
            "ios",
            "--template",
            "dark",
            "--save",
        ],
    );
    assert_success(&output);

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("settings.json")).unwrap())
            .unwrap();
    assert_eq!(saved["use_transparent_bg"], false);
    assert_eq!(saved["recent_files"][0], source.to_str().unwrap());

    let bg = saved["bg_color"].as_str().unwrap();
    let expected = flutter_icon_gen::parse_hex_color(bg).unwrap();
    let icon = image::open(out.join("ios/AppIcon.appiconset/Icon-App-60x60@3x.png")).unwrap();
    assert_eq!(icon.dimensions(), (180, 180));
    let corner = icon.get_pixel(0, 0);
    assert_eq!([corner[0], corner[1], corner[2]], expected.0);
}

#[test]
fn test_cli_list_templates() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["unused.png", "--list-templates"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dark"), "{stdout}");
}
