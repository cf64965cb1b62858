//! Locating, validating and preparing the installation directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::config::LauncherConfig;
use crate::error::{LaunchError, Result};
use crate::host::{HostOs, PathProbe};

/// The directory the launcher executable lives in, plus its layout.
#[derive(Debug, Clone)]
pub struct InstallDir {
    /// Absolute path of the installation directory.
    pub root: PathBuf,
    /// Expected layout of `root`.
    pub config: LauncherConfig,
}

impl InstallDir {
    /// Wrap an already known directory.
    pub const fn new(root: PathBuf, config: LauncherConfig) -> Self {
        Self { root, config }
    }

    /// Directory containing the running executable.
    pub fn locate() -> Result<PathBuf> {
        let exe = std::env::current_exe().map_err(LaunchError::Locate)?;
        let exe = exe.canonicalize().unwrap_or(exe);
        exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            LaunchError::Locate(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "executable has no parent directory",
            ))
        })
    }

    /// Locate the install dir and load its `launcher.toml` override.
    pub fn discover() -> Result<Self> {
        let root = Self::locate()?;
        let config = LauncherConfig::load_from(&root)?;
        Ok(Self::new(root, config))
    }

    /// Folder holding the tool scripts.
    pub fn tools_dir(&self) -> PathBuf {
        self.root.join(&self.config.tools_dir)
    }

    /// Folder holding the Python environment.
    pub fn python_dir(&self) -> PathBuf {
        self.root.join(&self.config.python_dir)
    }

    /// Every tool script the install must ship.
    pub fn tool_scripts(&self) -> Vec<PathBuf> {
        let tools = self.tools_dir();
        self.config.tool_scripts.iter().map(|s| tools.join(s)).collect()
    }

    /// Script users can run by hand when the launcher cannot.
    pub fn launch_script(&self) -> PathBuf {
        self.root.join(&self.config.launch_script)
    }

    /// Interpreter for `host`.
    pub fn interpreter(&self, host: HostOs) -> PathBuf {
        match host {
            HostOs::Windows => self.root.join(&self.config.python.windows),
            _ => self.root.join(&self.config.python.unix),
        }
    }

    /// Check the layout: directory name first, then the tools folder, the
    /// Python folder and finally every tool script.
    pub fn validate<P: PathProbe + ?Sized>(&self, probe: &P) -> Result<()> {
        let name_matches = self
            .root
            .file_name()
            .is_some_and(|n| n == self.config.app_name.as_str());
        if !name_matches {
            return Err(LaunchError::Misplaced {
                dir: self.root.clone(),
                expected: self.config.app_name.clone(),
            });
        }

        let folders = [
            (format!("\"{}\" folder", self.config.tools_dir), self.tools_dir()),
            (format!("\"{}\" folder", self.config.python_dir), self.python_dir()),
        ];
        for (what, path) in folders {
            if !probe.exists(&path) {
                return Err(LaunchError::MissingResource {
                    what,
                    paths: vec![path],
                });
            }
        }

        let missing: Vec<PathBuf> = self
            .tool_scripts()
            .into_iter()
            .filter(|p| !probe.exists(p))
            .collect();
        if !missing.is_empty() {
            return Err(LaunchError::MissingResource {
                what: "tool scripts".to_string(),
                paths: missing,
            });
        }

        debug!("install layout at {} looks complete", self.root.display());
        Ok(())
    }

    /// Make the scripts executable and, on macOS, lift the download
    /// quarantine. Problems here are warnings; the launch may still work.
    pub fn prepare(&self, host: HostOs) {
        if host.is_unix() {
            let mut scripts = self.tool_scripts();
            scripts.push(self.launch_script());
            for script in &scripts {
                if let Err(e) = make_executable(script) {
                    warn!("could not make {} executable: {e}", script.display());
                }
            }
        }
        if host == HostOs::MacOs {
            eprintln!("Preparing directory contents…");
            self.unquarantine();
        }
    }

    fn unquarantine(&self) {
        let Ok(xattr) = which::which("xattr") else {
            warn!("xattr not found on PATH, skipping quarantine removal");
            return;
        };
        let result = Command::new(xattr)
            .args(["-r", "-d", "com.apple.quarantine"])
            .arg(self.tools_dir())
            .arg(self.python_dir())
            .arg(self.launch_script())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match result {
            Ok(status) if !status.success() => {
                debug!("xattr exited with status {:?}", status.code());
            }
            Err(e) => warn!("failed to run xattr: {e}"),
            _ => {}
        }
    }

    /// Command that starts the bundled application.
    pub fn target_command(&self, host: HostOs) -> String {
        let mut parts = vec![
            self.interpreter(host).display().to_string(),
            "-m".to_string(),
            self.config.module.clone(),
        ];
        parts.extend(self.config.args.iter().cloned());
        parts.join(" ")
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file does not exist",
        ));
    }
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
