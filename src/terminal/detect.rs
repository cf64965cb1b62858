use log::debug;

use super::TerminalEmulator;
use crate::host::{HostOs, PathProbe};

/// Pick the terminal emulator for `host`.
///
/// macOS and Windows never touch the probe. Everywhere else the first entry
/// of [`TerminalEmulator::PRIORITY`] with an existing binary wins, and
/// [`TerminalEmulator::None`] is returned when nothing matches.
pub fn detect<P: PathProbe + ?Sized>(host: HostOs, probe: &P) -> TerminalEmulator {
    match host {
        HostOs::MacOs => TerminalEmulator::MacosDefault,
        HostOs::Windows => TerminalEmulator::WindowsPowershell,
        HostOs::Linux | HostOs::Other => {
            let found = TerminalEmulator::PRIORITY
                .into_iter()
                .find(|emulator| {
                    emulator
                        .probe_paths()
                        .iter()
                        .any(|path| probe.exists(path))
                })
                .unwrap_or(TerminalEmulator::None);
            debug!("terminal detection on {host:?} selected {found}");
            found
        }
    }
}
