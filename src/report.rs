//! User-facing fatal error reporting.

use log::{error, warn};

use crate::error::LaunchError;
use crate::host::HostOs;
use crate::install::InstallDir;
use crate::launch::{ShellSpawner, Spawner};
use crate::terminal::{build_message, TerminalEmulator};

/// Surfaces a fatal error to the person who double-clicked the launcher.
pub trait Reporter {
    /// Show `message`. The run ends afterwards.
    fn report_fatal(&mut self, message: &str);
}

/// Text telling the user how to recover from `err`.
pub fn remediation(err: &LaunchError, install: &InstallDir) -> String {
    let app = &install.config.app_name;
    let script = install.launch_script();
    let script = script.display();
    let manual_start = format!(
        "{script}\n\n\
         If you see a \"permission denied\" error, run the following command to fix it \
         before trying again:\n\n\
         chmod +x {script}"
    );

    match err {
        LaunchError::Misplaced { .. } => format!(
            "It looks like the {app} executable has been moved out of its installation \
             directory, or the installation directory has been renamed. The executable needs \
             to stay inside the installation directory, and that directory must still be \
             called {app}."
        ),
        LaunchError::MissingResource { what, paths } if what == "tool scripts" => {
            let missing = paths
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "One or more tool scripts are missing from the \"{tools}\" folder ({missing}). \
                 It should contain: {expected}. Download them again from {url} or extract them \
                 from your original {app} download.",
                tools = install.config.tools_dir,
                expected = install.config.tool_scripts.join(", "),
                url = install.config.tool_scripts_url,
            )
        }
        LaunchError::MissingResource { what, .. } => format!(
            "The {what} is missing from {root}. If you have moved it, please move it back to \
             its original location. If it was deleted, reinstall {app} or extract the folder \
             again from the {app} download.",
            root = install.root.display(),
        ),
        LaunchError::NoTerminalFound => format!(
            "Sorry, your terminal emulator was not detected automatically. Please start {app} \
             from a terminal using the provided shell script:\n\n{manual_start}"
        ),
        LaunchError::LaunchFailed { .. } | LaunchError::Spawn(_) => format!(
            "There was an unhandled error starting {app} ({err}). If you see an open terminal \
             with an error message, take note of it. If not, try running {app} directly from \
             a terminal:\n\n{manual_start}\n\n\
             If there is no obvious solution, please contact the developers at:\n\n\t{issues}",
            issues = install.config.issues_url,
        ),
        LaunchError::Locate(_) | LaunchError::Config { .. } => err.to_string(),
    }
}

/// Logs every error, then shows it the way the host allows: the detected
/// terminal on Linux, else a `zenity`/`kdialog` box; an `osascript` dialog
/// on macOS; a `PowerShell` message box on Windows.
#[derive(Debug)]
pub struct DesktopReporter<S = ShellSpawner> {
    host: HostOs,
    emulator: TerminalEmulator,
    spawner: S,
    has_tool: fn(&str) -> bool,
}

impl DesktopReporter {
    /// Reporter that can reuse the detected `emulator`.
    pub const fn new(host: HostOs, emulator: TerminalEmulator) -> Self {
        Self::with_spawner(host, emulator, ShellSpawner::new(host), on_path)
    }
}

impl<S: Spawner> DesktopReporter<S> {
    /// Reporter that runs its windows through `spawner` and asks
    /// `has_tool` whether a dialog program is installed.
    pub const fn with_spawner(
        host: HostOs,
        emulator: TerminalEmulator,
        spawner: S,
        has_tool: fn(&str) -> bool,
    ) -> Self {
        Self {
            host,
            emulator,
            spawner,
            has_tool,
        }
    }

    fn spawn(&mut self, line: &str) -> Option<i32> {
        self.spawner
            .spawn_and_wait(line, &std::env::temp_dir())
            .inspect_err(|e| warn!("could not open a window for the error message: {e}"))
            .ok()
    }

    fn show_in_terminal(&mut self, message: &str) -> bool {
        if self.emulator == TerminalEmulator::None {
            return false;
        }
        match build_message(message, self.emulator) {
            Ok(line) => self.spawn(&line) == Some(0),
            Err(e) => {
                warn!("cannot show error in a terminal: {e}");
                false
            }
        }
    }

    // Dialogs exit non-zero when closed without pressing OK.
    fn show_dialog(&mut self, message: &str) -> bool {
        dialog_command(self.host, message, self.has_tool)
            .and_then(|line| self.spawn(&line))
            .is_some()
    }
}

impl<S: Spawner> Reporter for DesktopReporter<S> {
    fn report_fatal(&mut self, message: &str) {
        error!("{message}");
        eprintln!("Error: {message}");
        let shown = match self.host {
            HostOs::Linux | HostOs::Other => {
                self.show_in_terminal(message) || self.show_dialog(message)
            }
            HostOs::MacOs | HostOs::Windows => self.show_dialog(message),
        };
        if !shown {
            warn!("no terminal or dialog program available; the error is only on stderr");
        }
    }
}

fn on_path(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Shell line that shows `message` in a blocking error dialog, if the host
/// has a dialog program. `has_tool` answers whether a program is installed.
pub fn dialog_command(
    host: HostOs,
    message: &str,
    has_tool: impl Fn(&str) -> bool,
) -> Option<String> {
    match host {
        HostOs::MacOs => {
            let escaped = message.replace('\\', "\\\\").replace('"', "\\\"");
            let script = format!(
                r#"display dialog "{escaped}" with title "Error" buttons {{"OK"}} with icon stop"#
            );
            Some(format!("osascript -e {}", sh_quote(&script)))
        }
        HostOs::Linux | HostOs::Other if has_tool("zenity") => Some(format!(
            "zenity --error --no-markup --title='Error' --text={}",
            sh_quote(message)
        )),
        HostOs::Linux | HostOs::Other if has_tool("kdialog") => Some(format!(
            "kdialog --title 'Error' --error {}",
            sh_quote(message)
        )),
        HostOs::Linux | HostOs::Other => None,
        HostOs::Windows => Some(format!(
            "powershell -NoProfile -Command Add-Type -AssemblyName PresentationFramework; \
             [void][System.Windows.MessageBox]::Show({}, 'Error')",
            powershell_text(message)
        )),
    }
}

/// `'…'` for `sh`, with embedded single quotes closed and reopened.
fn sh_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// A `PowerShell` string expression for `message` that survives `cmd /C`:
/// single-quoted lines joined by `NewLine`, no double quotes, and the
/// `cmd` metacharacters caret-escaped.
fn powershell_text(message: &str) -> String {
    message
        .split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r').replace('"', "'").replace('\'', "''");
            let mut out = String::with_capacity(line.len() + 2);
            out.push('\'');
            for c in line.chars() {
                if matches!(c, '^' | '&' | '|' | '<' | '>') {
                    out.push('^');
                }
                out.push(c);
            }
            out.push('\'');
            out
        })
        .collect::<Vec<_>>()
        .join(" + [Environment]::NewLine + ")
}
