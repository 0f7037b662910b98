//! `inifile`: read and write INI files from the command line.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use inifile_cli::{cli, commands, logging};

fn main() -> Result<ExitCode> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    let mut stdout = std::io::stdout().lock();
    commands::run(&args, &mut stdout)
}
