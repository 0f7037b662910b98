//! Command: print version information.
use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;

/// Version baked in at build time, or the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("INIFILE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the inifile version.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut impl Write) -> Result<ExitCode> {
    writeln!(out, "inifile {}", version())?;
    Ok(ExitCode::SUCCESS)
}
