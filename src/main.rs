use anyhow::{bail, Context, Result};
use clap::Parser;
use flutter_icon_gen::{
    config::{AppConfig, ConfigStore, JsonConfigStore, DEFAULT_APP_NAME},
    generate::load_source,
    install, logging, splash,
    templates::TemplateRegistry,
    toolchain::{self, BuildToolchain, FlutterCli},
    Background, GenerateOptions, Platform, PlatformSet,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "flutter-icon-gen",
    about = "Generate Flutter launcher icons for Android, iOS, Web, Windows and macOS"
)]
struct Args {
    /// Path to the source image (PNG, JPEG, BMP, GIF or TIFF).
    #[clap(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Platforms to generate. Defaults to all of them.
    #[clap(short, long, value_enum, value_delimiter = ',', value_name = "PLATFORMS")]
    platforms: Vec<Platform>,

    /// Background color as #RRGGBB, or "transparent". Defaults to the saved setting.
    #[clap(short, long, value_name = "COLOR")]
    background: Option<String>,

    /// Fraction of the Android launcher canvas the logo may cover (0.5 - 1.0)
    #[clap(long, value_name = "SCALE")]
    android_scale: Option<f64>,

    /// Fraction of the iOS canvas the logo may cover (0.5 - 1.0)
    #[clap(long, value_name = "SCALE")]
    ios_scale: Option<f64>,

    /// Apply a named preset before the other options (see --list-templates)
    #[clap(short, long, value_name = "NAME")]
    template: Option<String>,

    /// List the available presets and exit
    #[clap(long)]
    list_templates: bool,

    /// App name written into the PWA manifest
    #[clap(long, default_value = DEFAULT_APP_NAME)]
    app_name: String,

    /// Also write the Android 12 splash-screen images
    #[clap(long)]
    splash: bool,

    /// Copy the generated icons into this Flutter project
    #[clap(long, value_name = "PROJECT")]
    install_into: Option<PathBuf>,

    /// After installing, run flutter_launcher_icons in the project
    #[clap(long, requires = "install_into")]
    run_launcher_icons: bool,

    /// Remember these settings for the next run
    #[clap(long)]
    save: bool,

    /// Settings file to use instead of the one in the user config directory
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let templates = TemplateRegistry::load_default().unwrap_or_default();
    if args.list_templates {
        for id in templates.ids() {
            if let Some(t) = templates.get(id) {
                println!("{id:<16} {} - {}", t.name, t.description);
            }
        }
        return Ok(());
    }

    let store = match &args.config {
        Some(path) => JsonConfigStore::new(path),
        None => JsonConfigStore::default_location().context("Can't locate config directory")?,
    };
    let mut config = store.load().context("Failed to load settings")?;
    apply_args(&args, &templates, &mut config)?;

    let platforms: PlatformSet = if args.platforms.is_empty() {
        PlatformSet::all()
    } else {
        args.platforms.iter().copied().collect()
    };
    let options = GenerateOptions {
        app_name: args.app_name.clone(),
        ..config.to_options(platforms.clone())?
    };
    options.validate()?;

    let source = load_source(&args.input)?;
    let report = flutter_icon_gen::generate_from_image(&source, &args.output, &options)?;

    for asset in report.assets() {
        println!("  ✓ Generated {}", display_rel(&asset.path, &args.output));
    }
    if let Some(path) = &report.build_config {
        println!("  ✓ Generated {}", display_rel(path, &args.output));
    }

    if args.splash {
        for asset in splash::generate_splash(&source, &args.output)? {
            println!("  ✓ Generated {}", display_rel(&asset.path, &args.output));
        }
    }

    println!("{report}");

    if args.save {
        let input = args.input.display().to_string();
        config.add_recent_file(&input);
        config.last_input_path = input;
        config.last_output_path = args.output.display().to_string();
        store.save(&config).context("Failed to save settings")?;
    }

    if let Some(project) = &args.install_into {
        for (platform, copied) in install::copy_to_project(&args.output, project, &platforms) {
            let mark = if copied { "✓" } else { "✗" };
            println!("  {mark} {platform} -> {}", install::project_dir(platform).display());
        }

        if args.run_launcher_icons {
            let flutter = FlutterCli::detect();
            if !flutter.is_available() {
                bail!("flutter was not found on PATH");
            }
            let config_file = report.build_config.as_deref();
            let out = toolchain::run_launcher_icons(&flutter, project, config_file)?;
            println!("{}", out.output.trim());
            if !out.success() {
                bail!("flutter_launcher_icons failed (exit code {:?})", out.exit_code);
            }
            println!("✓ flutter_launcher_icons finished");
        }
    }

    if !report.is_complete() {
        bail!("some files could not be written");
    }
    Ok(())
}

/// Layer a template and explicit flags over the saved settings.
fn apply_args(args: &Args, templates: &TemplateRegistry, config: &mut AppConfig) -> Result<()> {
    if let Some(id) = &args.template {
        if !templates.apply(id, config) {
            bail!("Unknown template: {id}. Run with --list-templates to see the presets");
        }
    }

    if let Some(background) = &args.background {
        match background.parse::<Background>()? {
            Background::Transparent => config.use_transparent_bg = true,
            Background::Solid(_) => {
                config.use_transparent_bg = false;
                config.bg_color = background.trim().to_string();
            }
        }
    }
    if let Some(scale) = args.android_scale {
        config.android_scale = scale;
    }
    if let Some(scale) = args.ios_scale {
        config.ios_scale = scale;
    }
    Ok(())
}

fn display_rel(path: &std::path::Path, root: &std::path::Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
