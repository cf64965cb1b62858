use std::path::{Path, PathBuf};

use log::debug;

use super::LauncherConfig;
use crate::error::{LaunchError, Result};

/// File name of the optional override next to the executable.
pub const CONFIG_FILE: &str = "launcher.toml";

impl LauncherConfig {
    /// Path of the override file for an install dir.
    pub fn path(install_dir: &Path) -> PathBuf {
        install_dir.join(CONFIG_FILE)
    }

    /// Load the override file if present, otherwise the built-in defaults.
    pub fn load_from(install_dir: &Path) -> Result<Self> {
        let path = Self::path(install_dir);
        if !path.exists() {
            debug!("no {CONFIG_FILE} in {}, using defaults", install_dir.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| LaunchError::Config {
            path: path.clone(),
            source: Box::new(e),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| LaunchError::Config {
            path: path.clone(),
            source: Box::new(e),
        })?;
        debug!("loaded launcher config from {}", path.display());
        Ok(config)
    }
}
