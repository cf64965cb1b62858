//! Errors that end a launcher run.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the launcher library.
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Every way a launch can fail. All of them end the run.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// No supported terminal emulator is installed.
    #[error("No supported terminal emulator was found")]
    NoTerminalFound,

    /// The executable is not inside a directory with the expected name.
    #[error("Launcher is in `{}`, expected a directory named `{expected}`", .dir.display())]
    Misplaced {
        /// Directory the executable was found in.
        dir: PathBuf,
        /// Directory name the install must have.
        expected: String,
    },

    /// A companion file or directory is absent.
    #[error("Missing {what}: {}", display_paths(.paths))]
    MissingResource {
        /// Human description, e.g. `"tools folder"`.
        what: String,
        /// Every path that was checked and found missing.
        paths: Vec<PathBuf>,
    },

    /// The launched process exited unsuccessfully.
    #[error("Launched process exited with status {exit_code}")]
    LaunchFailed {
        /// Exit code reported by the process (`-1` if killed by a signal).
        exit_code: i32,
    },

    /// The process could not be started at all.
    #[error("Failed to start process: {0}")]
    Spawn(#[source] std::io::Error),

    /// The executable's own location could not be determined.
    #[error("Could not determine launcher location: {0}")]
    Locate(#[source] std::io::Error),

    /// `launcher.toml` exists but could not be read or parsed.
    #[error("Invalid launcher config at `{}`: {source}", .path.display())]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// Read or parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
