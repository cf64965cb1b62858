//! Terminal emulator detection and command-line building.

mod build;
mod detect;


pub use build::{build, build_message};
pub use detect::detect;

use std::path::PathBuf;

/// How an emulator expects the command after its invocation prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `<invocation><command>`
    Plain,
    /// `<invocation>"<command>"`
    Quoted,
    /// A `read` prompt inside `bash -c "..."`, then the emulator's own quoting.
    QuotedBashWrapped,
}

/// Terminal emulators the launcher knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEmulator {
    /// Nothing usable was found.
    None,
    /// GNOME Terminal
    GnomeTerminal,
    /// KDE Konsole
    Konsole,
    /// MATE Terminal
    MateTerminal,
    /// Debian alternatives entry
    XTerminalEmulator,
    /// Terminator
    Terminator,
    /// xterm
    Xterm,
    /// aterm
    Aterm,
    /// Tilda
    Tilda,
    /// Xfce Terminal
    Xfce4Terminal,
    /// macOS opens Terminal.app on its own; no wrapper needed.
    MacosDefault,
    /// Windows PowerShell window
    WindowsPowershell,
}

impl TerminalEmulator {
    /// Linux detection order; first installed wins.
    pub const PRIORITY: [Self; 9] = [
        Self::GnomeTerminal,
        Self::Konsole,
        Self::MateTerminal,
        Self::XTerminalEmulator,
        Self::Terminator,
        Self::Xterm,
        Self::Aterm,
        Self::Tilda,
        Self::Xfce4Terminal,
    ];

    /// Executable name probed under `/bin` and `/usr/bin`.
    pub const fn binary(self) -> Option<&'static str> {
        match self {
            Self::GnomeTerminal => Some("gnome-terminal"),
            Self::Konsole => Some("konsole"),
            Self::MateTerminal => Some("mate-terminal"),
            Self::XTerminalEmulator => Some("x-terminal-emulator"),
            Self::Terminator => Some("terminator"),
            Self::Xterm => Some("xterm"),
            Self::Aterm => Some("aterm"),
            Self::Tilda => Some("tilda"),
            Self::Xfce4Terminal => Some("xfce4-terminal"),
            Self::None | Self::MacosDefault | Self::WindowsPowershell => None,
        }
    }

    /// Prefix placed before the command, including its trailing space.
    pub const fn invocation(self) -> &'static str {
        match self {
            Self::GnomeTerminal => "gnome-terminal -- ",
            Self::Konsole => "konsole -e ",
            Self::MateTerminal => "mate-terminal -e ",
            Self::XTerminalEmulator => "x-terminal-emulator -e ",
            Self::Terminator => "terminator -e ",
            Self::Xterm => "xterm -e ",
            Self::Aterm => "aterm -e ",
            Self::Tilda => "tilda -c ",
            Self::Xfce4Terminal => "xfce4-terminal -e ",
            Self::WindowsPowershell => "start /wait powershell.exe -Command ",
            Self::None | Self::MacosDefault => "",
        }
    }

    /// Quoting the emulator needs around a multi-word command.
    pub const fn dialect(self) -> Dialect {
        match self {
            Self::MateTerminal | Self::Terminator | Self::Tilda | Self::Xfce4Terminal => {
                Dialect::Quoted
            }
            _ => Dialect::Plain,
        }
    }

    /// Paths whose existence means this emulator is installed.
    pub fn probe_paths(self) -> Vec<PathBuf> {
        self.binary()
            .map(|bin| {
                ["/bin", "/usr/bin"]
                    .iter()
                    .map(|dir| PathBuf::from(dir).join(bin))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for TerminalEmulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::MacosDefault => "macos-default",
            Self::WindowsPowershell => "windows-powershell",
            other => other.binary().unwrap_or("none"),
        };
        f.write_str(name)
    }
}
