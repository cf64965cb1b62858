//! Launch requests, outcomes and process spawning.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::info;

use crate::error::{LaunchError, Result};
use crate::host::HostOs;

/// What to run and where. Built once, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    target_command: String,
    working_directory_hint: PathBuf,
}

impl LaunchRequest {
    /// Create a request.
    pub fn new(target_command: impl Into<String>, working_directory_hint: impl Into<PathBuf>) -> Self {
        Self {
            target_command: target_command.into(),
            working_directory_hint: working_directory_hint.into(),
        }
    }

    /// Command to run inside the terminal.
    pub fn target_command(&self) -> &str {
        &self.target_command
    }

    /// Directory the process should start in.
    pub fn working_directory_hint(&self) -> &Path {
        &self.working_directory_hint
    }
}

/// Result of the single blocking wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Exit code of the command line, `-1` when killed by a signal.
    pub exit_code: i32,
    /// `exit_code == 0`
    pub succeeded: bool,
}

impl LaunchOutcome {
    /// Outcome for an exit code.
    pub const fn from_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            succeeded: exit_code == 0,
        }
    }

    /// Turn a failed outcome into [`LaunchError::LaunchFailed`].
    pub fn into_result(self) -> Result<Self> {
        if self.succeeded {
            Ok(self)
        } else {
            Err(LaunchError::LaunchFailed {
                exit_code: self.exit_code,
            })
        }
    }
}

/// Runs a full command line and blocks until it exits.
pub trait Spawner {
    /// Run `command_line` in `working_dir` and return its exit code.
    fn spawn_and_wait(&mut self, command_line: &str, working_dir: &Path) -> Result<i32>;
}

impl<T: Spawner + ?Sized> Spawner for &mut T {
    fn spawn_and_wait(&mut self, command_line: &str, working_dir: &Path) -> Result<i32> {
        (**self).spawn_and_wait(command_line, working_dir)
    }
}

/// Runs command lines through the host shell, the way `system()` does.
#[derive(Debug, Clone, Copy)]
pub struct ShellSpawner {
    host: HostOs,
}

impl ShellSpawner {
    /// Spawner for `host`.
    pub const fn new(host: HostOs) -> Self {
        Self { host }
    }

    fn command(&self, command_line: &str) -> Command {
        match self.host {
            HostOs::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.args(["/C", command_line]);
                cmd
            }
            _ => {
                let mut cmd = Command::new("sh");
                cmd.args(["-c", command_line]);
                cmd
            }
        }
    }
}

impl Spawner for ShellSpawner {
    fn spawn_and_wait(&mut self, command_line: &str, working_dir: &Path) -> Result<i32> {
        info!("running `{command_line}` in {}", working_dir.display());
        let mut cmd = self.command(command_line);
        if working_dir.is_dir() {
            cmd.current_dir(working_dir);
        }
        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(LaunchError::Spawn)?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Spawner that records command lines instead of running them.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSpawner {
    pub lines: Vec<(String, PathBuf)>,
    pub exit_code: i32,
    /// Number of leading calls that fail to start.
    pub failures: usize,
}

#[cfg(test)]
impl Spawner for RecordingSpawner {
    fn spawn_and_wait(&mut self, command_line: &str, working_dir: &Path) -> Result<i32> {
        self.lines.push((command_line.to_string(), working_dir.to_path_buf()));
        if self.failures > 0 {
            self.failures -= 1;
            return Err(LaunchError::Spawn(std::io::Error::from(
                std::io::ErrorKind::NotFound,
            )));
        }
        Ok(self.exit_code)
    }
}
