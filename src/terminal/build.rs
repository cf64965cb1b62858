use super::{Dialect, TerminalEmulator};
use crate::error::{LaunchError, Result};

const CLOSE_PROMPT: &str = "Press any key to close this window...";

/// Build the command line that runs `command` inside a new `emulator` window.
///
/// The command text is passed through untouched; only the emulator prefix
/// and, for quoting emulators, one pair of double quotes are added.
pub fn build(command: &str, emulator: TerminalEmulator) -> Result<String> {
    build_with(command, emulator, emulator.dialect())
}

/// Build a command line that shows `message` in a new `emulator` window and
/// keeps the window open until a key is pressed.
pub fn build_message(message: &str, emulator: TerminalEmulator) -> Result<String> {
    build_with(message, emulator, Dialect::QuotedBashWrapped)
}

fn build_with(payload: &str, emulator: TerminalEmulator, dialect: Dialect) -> Result<String> {
    if emulator == TerminalEmulator::None {
        return Err(LaunchError::NoTerminalFound);
    }
    let invocation = emulator.invocation();
    let line = match dialect {
        Dialect::Plain => format!("{invocation}{payload}"),
        Dialect::Quoted => format!("{invocation}\"{payload}\""),
        Dialect::QuotedBashWrapped => {
            let prompt = format!("{payload}\n\n{CLOSE_PROMPT}");
            let read = format!("read -r -s -n 1 -p $'{}'", ansi_c_escape(&prompt));
            let bash = format!("bash -c \"{}\"", double_quote_escape(&read));
            match emulator.dialect() {
                Dialect::Quoted => format!("{invocation}\"{}\"", double_quote_escape(&bash)),
                Dialect::Plain | Dialect::QuotedBashWrapped => format!("{invocation}{bash}"),
            }
        }
    };
    Ok(line)
}

/// Escape text for a bash `$'...'` string.
fn ansi_c_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape the characters that stay special inside POSIX double quotes.
fn double_quote_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
