//! Optional hand-off to a Flutter project's own icon build step.
//!
//! The core never spawns processes; everything here goes through
//! [`BuildToolchain`], with [`FlutterCli`] as the real implementation.

use crate::error::ToolchainError;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const LAUNCHER_ICONS_PACKAGE: &str = "flutter_launcher_icons";
pub const LAUNCHER_ICONS_VERSION: &str = "^0.13.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Exit status and combined stdout/stderr of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: Option<i32>,
    pub output: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability for invoking an external build tool.
pub trait BuildToolchain {
    fn is_available(&self) -> bool;
    fn run(&self, args: &[&str], cwd: &Path) -> Result<ToolOutput, ToolchainError>;
}

/// The `flutter` executable.
#[derive(Debug, Clone)]
pub struct FlutterCli {
    executable: Option<PathBuf>,
    timeout: Duration,
}

impl FlutterCli {
    /// Look for `flutter` on PATH, then in common install locations.
    pub fn detect() -> Self {
        let executable = locate("flutter", common_install_paths());
        debug!(?executable, "flutter lookup");
        Self {
            executable,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(executable.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl BuildToolchain for FlutterCli {
    fn is_available(&self) -> bool {
        self.executable.is_some()
    }

    fn run(&self, args: &[&str], cwd: &Path) -> Result<ToolOutput, ToolchainError> {
        let executable = self.executable.as_ref().ok_or(ToolchainError::NotAvailable)?;
        info!(executable = %executable.display(), ?args, cwd = %cwd.display(), "running build tool");

        let mut child = Command::new(executable)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ToolchainError::Launch(e.to_string()))?;

        // Drain both pipes on their own threads so a chatty tool cannot block on a full pipe.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let start = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if start.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolchainError::TimedOut(self.timeout));
            }
            std::thread::sleep(Duration::from_millis(50));
        };

        let collect = |handle: Option<std::thread::JoinHandle<String>>| {
            handle.and_then(|h| h.join().ok()).unwrap_or_default()
        };
        let output = format!("{}\n{}", collect(stdout), collect(stderr));
        Ok(ToolOutput {
            exit_code: status.code(),
            output,
        })
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// `program` as resolved through PATH, else the first existing fallback.
fn locate(program: &str, fallbacks: Vec<PathBuf>) -> Option<PathBuf> {
    which::which(program)
        .ok()
        .into_iter()
        .chain(fallbacks)
        .find(|candidate| candidate.is_file())
}

fn common_install_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if cfg!(windows) {
        for var in ["LOCALAPPDATA", "USERPROFILE"] {
            if let Some(base) = std::env::var_os(var) {
                paths.push(PathBuf::from(base).join("flutter").join("bin").join("flutter.bat"));
            }
        }
        paths.push(PathBuf::from(r"C:\flutter\bin\flutter.bat"));
        paths.push(PathBuf::from(r"C:\src\flutter\bin\flutter.bat"));
    } else if let Some(home) = dirs::home_dir() {
        paths.push(home.join("flutter").join("bin").join("flutter"));
        paths.push(home.join("development").join("flutter").join("bin").join("flutter"));
    }
    paths
}

pub fn is_flutter_project(dir: &Path) -> bool {
    dir.join("pubspec.yaml").is_file()
}

/// Whether `pubspec.yaml` already mentions the launcher-icons package.
pub fn has_launcher_icons(project: &Path) -> bool {
    std::fs::read_to_string(project.join("pubspec.yaml"))
        .map(|text| text.to_lowercase().contains(LAUNCHER_ICONS_PACKAGE))
        .unwrap_or(false)
}

/// Add the launcher-icons package under `dev_dependencies:`, creating the
/// section at the end of the file when it is missing. Returns false when the
/// package was already listed.
pub fn add_launcher_icons_dependency(project: &Path) -> Result<bool, ToolchainError> {
    let pubspec = project.join("pubspec.yaml");
    let text = std::fs::read_to_string(&pubspec)?;
    if text.to_lowercase().contains(LAUNCHER_ICONS_PACKAGE) {
        return Ok(false);
    }

    let entry = format!("  {LAUNCHER_ICONS_PACKAGE}: {LAUNCHER_ICONS_VERSION}");
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    match lines.iter().position(|l| l.contains("dev_dependencies:")) {
        Some(idx) => lines.insert(idx + 1, entry),
        None => {
            lines.push(String::new());
            lines.push("dev_dependencies:".to_string());
            lines.push(entry);
        }
    }

    let mut updated = lines.join("\n");
    updated.push('\n');
    std::fs::write(&pubspec, updated)?;
    Ok(true)
}

/// Make sure the project depends on the launcher-icons package, then run it.
///
/// `config_file` is passed as `-f <file>` when given.
pub fn run_launcher_icons(
    tool: &dyn BuildToolchain,
    project: &Path,
    config_file: Option<&Path>,
) -> Result<ToolOutput, ToolchainError> {
    if !tool.is_available() {
        return Err(ToolchainError::NotAvailable);
    }
    if !is_flutter_project(project) {
        return Err(ToolchainError::NotProject(project.to_path_buf()));
    }

    if add_launcher_icons_dependency(project)? {
        let fetched = tool.run(&["pub", "get"], project)?;
        if !fetched.success() {
            return Ok(fetched);
        }
    }

    let config = config_file.map(|p| p.to_string_lossy().into_owned());
    let mut args = vec!["pub", "run", LAUNCHER_ICONS_PACKAGE];
    if let Some(config) = &config {
        args.extend(["-f", config.as_str()]);
    }
    tool.run(&args, project)
}

/// First line of `flutter --version`, if the tool runs.
pub fn flutter_version(tool: &dyn BuildToolchain, cwd: &Path) -> Option<String> {
    let out = tool.run(&["--version"], cwd).ok()?;
    if !out.success() {
        return None;
    }
    out.output.lines().next().map(|l| l.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records invocations and answers with a fixed exit code.
    struct FakeTool {
        available: bool,
        exit_code: i32,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeTool {
        fn new(exit_code: i32) -> Self {
            Self {
                available: true,
                exit_code,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl BuildToolchain for FakeTool {
        fn is_available(&self) -> bool {
            self.available
        }

        fn run(&self, args: &[&str], _cwd: &Path) -> Result<ToolOutput, ToolchainError> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect());
            Ok(ToolOutput {
                exit_code: Some(self.exit_code),
                output: "Flutter 3.24.0 • channel stable\nTools • Dart 3.5.0".to_string(),
            })
        }
    }

    fn project(pubspec: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pubspec.yaml"), pubspec).unwrap();
        dir
    }

    #[test]
    fn test_adds_dependency_under_existing_section() {
        let dir = project("name: demo\ndev_dependencies:\n  flutter_test:\n    sdk: flutter\n");
        assert!(add_launcher_icons_dependency(dir.path()).unwrap());
        let text = std::fs::read_to_string(dir.path().join("pubspec.yaml")).unwrap();
        assert!(text.contains("dev_dependencies:\n  flutter_launcher_icons: ^0.13.1\n  flutter_test:"));

        assert!(!add_launcher_icons_dependency(dir.path()).unwrap());
        assert!(has_launcher_icons(dir.path()));
    }

    #[test]
    fn test_adds_missing_section() {
        let dir = project("name: demo\n");
        assert!(add_launcher_icons_dependency(dir.path()).unwrap());
        let text = std::fs::read_to_string(dir.path().join("pubspec.yaml")).unwrap();
        assert!(text.ends_with("dev_dependencies:\n  flutter_launcher_icons: ^0.13.1\n"));
    }

    #[test]
    fn test_run_installs_then_runs() {
        let dir = project("name: demo\n");
        let tool = FakeTool::new(0);
        let out = run_launcher_icons(&tool, dir.path(), Some(Path::new("icons.yaml"))).unwrap();
        assert!(out.success());

        let calls = tool.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ["pub", "get"]);
        assert_eq!(calls[1], ["pub", "run", "flutter_launcher_icons", "-f", "icons.yaml"]);
    }

    #[test]
    fn test_run_stops_when_pub_get_fails() {
        let dir = project("name: demo\n");
        let tool = FakeTool::new(1);
        let out = run_launcher_icons(&tool, dir.path(), None).unwrap();
        assert!(!out.success());
        assert_eq!(tool.calls.borrow().len(), 1);
    }

    #[test]
    fn test_run_requires_tool_and_project() {
        let dir = TempDir::new().unwrap();
        let mut tool = FakeTool::new(0);
        assert!(matches!(
            run_launcher_icons(&tool, dir.path(), None),
            Err(ToolchainError::NotProject(_))
        ));

        tool.available = false;
        assert!(matches!(
            run_launcher_icons(&tool, dir.path(), None),
            Err(ToolchainError::NotAvailable)
        ));
    }

    #[test]
    fn test_flutter_version_first_line() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            flutter_version(&FakeTool::new(0), dir.path()).as_deref(),
            Some("Flutter 3.24.0 • channel stable")
        );
        assert_eq!(flutter_version(&FakeTool::new(2), dir.path()), None);
    }

    #[test]
    fn test_locate_falls_back_to_known_paths() {
        let dir = TempDir::new().unwrap();
        let installed = dir.path().join("flutter");
        std::fs::write(&installed, "").unwrap();

        let missing = dir.path().join("nowhere").join("flutter");
        assert_eq!(
            locate("flutter-icon-gen-no-such-tool", vec![missing, installed.clone()]),
            Some(installed)
        );
        assert_eq!(locate("flutter-icon-gen-no-such-tool", Vec::new()), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_searches_path() {
        let sh = locate("sh", Vec::new()).unwrap();
        assert!(sh.is_absolute() && sh.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_collects_exit_code_and_both_streams() {
        let cli = FlutterCli::with_executable("sh");
        assert!(cli.is_available());
        let out = cli
            .run(&["-c", "echo generated; echo careful >&2; exit 3"], Path::new("."))
            .unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert!(!out.success());
        assert!(out.output.contains("generated"));
        assert!(out.output.contains("careful"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_kills_tool_after_timeout() {
        let cli = FlutterCli::with_executable("sh").with_timeout(Duration::from_millis(200));
        let start = Instant::now();
        let result = cli.run(&["-c", "exec sleep 10"], Path::new("."));
        assert!(matches!(result, Err(ToolchainError::TimedOut(t)) if t == Duration::from_millis(200)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_missing_executable_is_unavailable() {
        let cli = FlutterCli {
            executable: None,
            timeout: DEFAULT_TIMEOUT,
        };
        assert!(!cli.is_available());
        assert!(matches!(
            cli.run(&["--version"], Path::new(".")),
            Err(ToolchainError::NotAvailable)
        ));
    }
}
