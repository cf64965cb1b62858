//! Installation layout settings and the optional `launcher.toml` override.

mod ops;


use serde::{Deserialize, Serialize};

/// Layout of the installation the launcher starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Name the installation directory must keep.
    pub app_name: String,
    /// Shell script users can run by hand, relative to the install dir.
    pub launch_script: String,
    /// Folder holding the tool scripts.
    pub tools_dir: String,
    /// Tool scripts that must exist inside `tools_dir`.
    pub tool_scripts: Vec<String>,
    /// Folder holding the bundled Python environment.
    pub python_dir: String,
    /// Interpreter location per host family.
    pub python: PythonConfig,
    /// Python module started with `-m`.
    pub module: String,
    /// Extra arguments passed after the module.
    pub args: Vec<String>,
    /// Where tool scripts can be downloaded again.
    pub tool_scripts_url: String,
    /// Where users should report launch problems.
    pub issues_url: String,
}

/// Interpreter paths relative to the install dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PythonConfig {
    /// macOS, Linux and other unix hosts
    pub unix: String,
    /// Windows
    pub windows: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            app_name: "MhcVizPipe".to_string(),
            launch_script: "MhcVizPipe.sh".to_string(),
            tools_dir: "tools".to_string(),
            tool_scripts: ["netMHCpan4.0", "netMHCpan4.1", "netMHCIIpan", "gibbscluster"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            python_dir: "python".to_string(),
            python: PythonConfig::default(),
            module: "MhcVizPipe.gui".to_string(),
            args: vec!["--standalone".to_string()],
            tool_scripts_url: "https://github.com/CaronLab/MhcVizPipe/tree/master/tool_scripts"
                .to_string(),
            issues_url: "https://github.com/CaronLab/MhcVizPipe/issues".to_string(),
        }
    }
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            unix: "python/bin/python3".to_string(),
            windows: "python/python.exe".to_string(),
        }
    }
}
