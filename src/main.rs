//! Double-clickable entry point for an MhcVizPipe installation.

use std::process::ExitCode;

use clap::Parser;

use mvp_launcher::{
    host::{FsProbe, HostOs},
    launch::ShellSpawner,
    report::DesktopReporter,
    InstallDir, Launcher,
};

#[derive(Parser)]
#[command(
    name = "MhcVizPipe",
    version,
    about = "Check the MhcVizPipe installation and start it in a terminal window"
)]
struct Cli {}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let Cli {} = Cli::parse();

    let host = HostOs::current();
    let mut launcher = Launcher::new(host, FsProbe, ShellSpawner::new(host));
    let mut reporter = DesktopReporter::new(host, launcher.emulator());
    launcher.run_reported(InstallDir::discover(), &mut reporter)
}
