//! Command-line definition for the `inifile` binary.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::document::LineEnding;

/// Top-level CLI entry point for the INI file tool.
#[derive(Parser, Debug)]
#[command(
    name = "inifile",
    about = "Read and write Windows-style INI configuration files",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Use CRLF line endings when a command creates a new file
    #[arg(long, global = true, conflicts_with = "lf")]
    pub crlf: bool,

    /// Use LF line endings when a command creates a new file
    #[arg(long, global = true)]
    pub lf: bool,
}

impl GlobalOpts {
    /// Line ending for files that do not exist yet. Existing files always
    /// keep their own.
    #[must_use]
    pub const fn new_file_line_ending(&self) -> LineEnding {
        if self.crlf {
            LineEnding::CrLf
        } else if self.lf {
            LineEnding::Lf
        } else {
            LineEnding::native()
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the section names of a file
    Sections(SectionsOpts),
    /// Print one or more sections of a file (exit code 1 if any is missing)
    Section(SectionOpts),
    /// Print a single value (exit code 1 if it is not set)
    Get(GetOpts),
    /// Set a single value, creating the file and section if needed
    Set(SetOpts),
    /// Remove a value, or a whole section when no key is given (exit code 1
    /// if nothing matched)
    Unset(UnsetOpts),
    /// Print whole files
    Show(ShowOpts),
    /// Write a JSON document into a file
    Import(ImportOpts),
    /// Print version information
    Version,
}

/// Options for the `sections` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SectionsOpts {
    /// INI file to read
    pub file: PathBuf,
}

/// Options for the `section` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SectionOpts {
    /// INI file to read
    pub file: PathBuf,

    /// Section names (case-insensitive)
    #[arg(required = true)]
    pub sections: Vec<String>,

    /// Print JSON instead of INI text
    #[arg(long)]
    pub json: bool,
}

/// Options for the `get` subcommand.
#[derive(Args, Debug, Clone)]
pub struct GetOpts {
    /// INI file to read
    pub file: PathBuf,
    /// Section name (case-insensitive)
    pub section: String,
    /// Key (case-insensitive)
    pub key: String,
}

/// Options for the `set` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SetOpts {
    /// INI file to update
    pub file: PathBuf,
    /// Section name
    pub section: String,
    /// Key
    pub key: String,
    /// New value (may be empty)
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Options for the `unset` subcommand.
#[derive(Args, Debug, Clone)]
pub struct UnsetOpts {
    /// INI file to update
    pub file: PathBuf,
    /// Section name
    pub section: String,
    /// Key to remove; the whole section is removed when omitted
    pub key: Option<String>,
}

/// Options for the `show` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ShowOpts {
    /// INI files to read; missing files are reported and skipped
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print JSON instead of INI text
    #[arg(long)]
    pub json: bool,
}

/// Options for the `import` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ImportOpts {
    /// INI file to write
    pub file: PathBuf,

    /// JSON document to read (the format printed by `show --json`)
    #[arg(long, value_name = "JSON")]
    pub from: PathBuf,

    /// Replace the file instead of merging into it
    #[arg(long)]
    pub replace: bool,
}
