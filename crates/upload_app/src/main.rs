use std::process::ExitCode;

use clap::Parser;

mod cli;
mod platform;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    if let Some(destination) = cli.log_destination() {
        platform::logging::initialize(destination);
    }
    platform::run_app(cli)
}
