//! Subcommand handlers.
//!
//! Handlers write their output to the writer they are given and report
//! diagnostics through [`tracing`]. A lookup that finds nothing is not an
//! error: it yields [`NOT_FOUND`] as the process exit code.
pub mod read;
pub mod version;
pub mod write;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;

use crate::cli::{Cli, Command};

/// Exit code for a lookup that found nothing.
pub const NOT_FOUND: u8 = 1;

/// Run the parsed command line, writing command output to `out`.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, or an argument is
/// not valid in an INI file.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<ExitCode> {
    match &cli.command {
        Command::Sections(opts) => read::sections(opts, out),
        Command::Section(opts) => read::section(opts, out),
        Command::Get(opts) => read::get(opts, out),
        Command::Show(opts) => read::show(opts, out),
        Command::Set(opts) => write::set(&cli.global, opts),
        Command::Unset(opts) => write::unset(opts),
        Command::Import(opts) => write::import(&cli.global, opts),
        Command::Version => version::run(out),
    }
}

/// `SUCCESS` when `found`, otherwise [`NOT_FOUND`].
fn found_code(found: bool) -> ExitCode {
    if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(NOT_FOUND)
    }
}
