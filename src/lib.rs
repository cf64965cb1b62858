//! Starts a bundled Python application inside a terminal window after
//! checking that its installation directory is intact.

pub mod config;
pub mod error;
pub mod host;
pub mod install;
pub mod launch;
pub mod launcher;
pub mod report;
pub mod terminal;

pub use config::LauncherConfig;
pub use error::LaunchError;
pub use install::InstallDir;
pub use launcher::Launcher;
pub use terminal::TerminalEmulator;
