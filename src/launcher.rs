//! The single launch path shared by every platform.

use std::process::ExitCode;

use log::info;

use crate::error::Result;
use crate::host::{HostOs, PathProbe};
use crate::install::InstallDir;
use crate::launch::{LaunchOutcome, LaunchRequest, Spawner};
use crate::report::{remediation, Reporter};
use crate::terminal::{self, TerminalEmulator};

/// One launcher run: check the install, pick a terminal, start the app.
pub struct Launcher<P, S> {
    host: HostOs,
    probe: P,
    spawner: S,
    emulator: TerminalEmulator,
}

impl<P: PathProbe, S: Spawner> Launcher<P, S> {
    /// Launcher for `host` using the given collaborators. The terminal is
    /// detected here, once per run.
    pub fn new(host: HostOs, probe: P, spawner: S) -> Self {
        let emulator = terminal::detect(host, &probe);
        Self {
            host,
            probe,
            spawner,
            emulator,
        }
    }

    /// Emulator detected for this run.
    pub const fn emulator(&self) -> TerminalEmulator {
        self.emulator
    }

    /// Validate and prepare `install`, then run the app in a terminal and
    /// wait for it. A non-zero exit becomes an error.
    pub fn run(&mut self, install: &InstallDir) -> Result<LaunchOutcome> {
        install.validate(&self.probe)?;
        install.prepare(self.host);

        let emulator = self.emulator;
        let request = LaunchRequest::new(install.target_command(self.host), &install.root);
        let line = terminal::build(request.target_command(), emulator)?;
        info!("starting {} with {emulator}", install.config.app_name);

        let code = self
            .spawner
            .spawn_and_wait(&line, request.working_directory_hint())?;
        LaunchOutcome::from_exit_code(code).into_result()
    }

    /// Run `install` (or fail on its discovery error) and turn any error
    /// into exactly one `report_fatal` call and a failing exit status.
    pub fn run_reported<R: Reporter + ?Sized>(
        &mut self,
        install: Result<InstallDir>,
        reporter: &mut R,
    ) -> ExitCode {
        let install = match install {
            Ok(install) => install,
            Err(e) => {
                reporter.report_fatal(&e.to_string());
                return ExitCode::FAILURE;
            }
        };
        match self.run(&install) {
            Ok(outcome) => {
                info!("{} exited with status {}", install.config.app_name, outcome.exit_code);
                ExitCode::SUCCESS
            }
            Err(e) => {
                reporter.report_fatal(&remediation(&e, &install));
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::config::LauncherConfig;
    use crate::error::LaunchError;
    use crate::launch::RecordingSpawner;

    #[derive(Default)]
    struct RecordingReporter {
        messages: Vec<String>,
    }

    impl Reporter for RecordingReporter {
        fn report_fatal(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn install() -> InstallDir {
        InstallDir::new(PathBuf::from("/opt/MhcVizPipe"), LauncherConfig::default())
    }

    fn layout_and(extra: &'static [&'static str]) -> impl Fn(&Path) -> bool {
        move |p: &Path| p.starts_with("/opt/MhcVizPipe") || extra.iter().any(|e| p == Path::new(e))
    }

    #[test]
    fn test_run_builds_and_spawns() {
        let mut spawner = RecordingSpawner::default();
        let mut launcher = Launcher::new(
            HostOs::Linux,
            layout_and(&["/usr/bin/xfce4-terminal"]),
            &mut spawner,
        );
        let outcome = launcher.run(&install()).unwrap();
        assert!(outcome.succeeded);
        assert_eq!(
            spawner.lines,
            vec![(
                "xfce4-terminal -e \"/opt/MhcVizPipe/python/bin/python3 -m MhcVizPipe.gui --standalone\""
                    .to_string(),
                PathBuf::from("/opt/MhcVizPipe"),
            )]
        );
    }

    #[test]
    fn test_run_without_terminal_never_spawns() {
        let mut spawner = RecordingSpawner::default();
        let mut launcher = Launcher::new(HostOs::Linux, layout_and(&[]), &mut spawner);
        let err = launcher.run(&install()).unwrap_err();
        assert!(matches!(err, LaunchError::NoTerminalFound));
        assert!(spawner.lines.is_empty());
    }

    #[test]
    fn test_run_nonzero_exit_is_launch_failed() {
        let mut spawner = RecordingSpawner {
            exit_code: 4,
            ..Default::default()
        };
        let mut launcher = Launcher::new(HostOs::MacOs, layout_and(&[]), &mut spawner);
        let err = launcher.run(&install()).unwrap_err();
        assert!(matches!(err, LaunchError::LaunchFailed { exit_code: 4 }));
        assert_eq!(
            spawner.lines[0].0,
            "/opt/MhcVizPipe/python/bin/python3 -m MhcVizPipe.gui --standalone"
        );
    }

    #[test]
    fn test_run_stops_on_missing_resource() {
        let mut spawner = RecordingSpawner::default();
        let probe = |p: &Path| p != Path::new("/opt/MhcVizPipe/python");
        let mut launcher = Launcher::new(HostOs::Linux, probe, &mut spawner);
        let err = launcher.run(&install()).unwrap_err();
        assert!(matches!(err, LaunchError::MissingResource { .. }));
        assert!(spawner.lines.is_empty());
    }

    #[test]
    fn test_windows_uses_powershell() {
        let mut spawner = RecordingSpawner::default();
        let mut launcher = Launcher::new(HostOs::Windows, layout_and(&[]), &mut spawner);
        launcher.run(&install()).unwrap();
        let line = &spawner.lines[0].0;
        assert!(line.starts_with("start /wait powershell.exe -Command "));
        assert!(line.ends_with("python.exe -m MhcVizPipe.gui --standalone"));
    }

    #[test]
    fn test_terminal_detected_once_at_construction() {
        let calls = std::cell::Cell::new(0);
        let probe = |p: &Path| {
            if p.starts_with("/usr/bin") || p.starts_with("/bin") {
                calls.set(calls.get() + 1);
            }
            p.starts_with("/opt/MhcVizPipe") || p == Path::new("/usr/bin/konsole")
        };
        let mut spawner = RecordingSpawner::default();
        let mut launcher = Launcher::new(HostOs::Linux, &probe, &mut spawner);
        assert_eq!(launcher.emulator(), TerminalEmulator::Konsole);
        let after_new = calls.get();
        launcher.run(&install()).unwrap();
        assert_eq!(calls.get(), after_new);
        assert!(spawner.lines[0].0.starts_with("konsole -e "));
    }

    #[test]
    fn test_run_reported_no_terminal_reports_manual_steps_once() {
        let mut spawner = RecordingSpawner::default();
        let mut reporter = RecordingReporter::default();
        let mut launcher = Launcher::new(HostOs::Linux, layout_and(&[]), &mut spawner);
        let code = launcher.run_reported(Ok(install()), &mut reporter);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(reporter.messages.len(), 1);
        assert!(reporter.messages[0].contains("/opt/MhcVizPipe/MhcVizPipe.sh\n"));
        assert!(reporter.messages[0].contains("chmod +x /opt/MhcVizPipe/MhcVizPipe.sh"));
        assert!(spawner.lines.is_empty());
    }

    #[test]
    fn test_run_reported_nonzero_exit_reports_once() {
        let mut spawner = RecordingSpawner {
            exit_code: 3,
            ..Default::default()
        };
        let mut reporter = RecordingReporter::default();
        let mut launcher = Launcher::new(HostOs::MacOs, layout_and(&[]), &mut spawner);
        let code = launcher.run_reported(Ok(install()), &mut reporter);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(reporter.messages.len(), 1);
        assert!(reporter.messages[0].contains("exited with status 3"));
        assert_eq!(spawner.lines.len(), 1);
    }

    #[test]
    fn test_run_reported_success_reports_nothing() {
        let mut spawner = RecordingSpawner::default();
        let mut reporter = RecordingReporter::default();
        let mut launcher = Launcher::new(HostOs::MacOs, layout_and(&[]), &mut spawner);
        let code = launcher.run_reported(Ok(install()), &mut reporter);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(reporter.messages.is_empty());
    }

    #[test]
    fn test_run_reported_discovery_error_never_spawns() {
        let mut spawner = RecordingSpawner::default();
        let mut reporter = RecordingReporter::default();
        let mut launcher = Launcher::new(HostOs::Linux, layout_and(&[]), &mut spawner);
        let err = LaunchError::Locate(std::io::Error::other("no exe path"));
        let code = launcher.run_reported(Err(err), &mut reporter);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            reporter.messages,
            vec!["Could not determine launcher location: no exe path".to_string()]
        );
        assert!(spawner.lines.is_empty());
    }
}
