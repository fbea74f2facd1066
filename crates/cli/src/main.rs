use std::process::ExitCode;

use aliasctl_cli::cli_args::Args;
use aliasctl_cli::commands;
use aliasctl_core::error::Result;
use clap::Parser;

fn execute() -> Result<()> {
    let args = Args::parse();
    commands::run(args)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
