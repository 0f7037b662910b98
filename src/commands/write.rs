//! Commands: `set`, `unset`, `import`.
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use super::found_code;
use crate::cli::{GlobalOpts, ImportOpts, SetOpts, UnsetOpts};
use crate::document::Document;
use crate::store::{self, IniFile, WriteOutcome};

/// Set one value.
///
/// # Errors
///
/// Returns an error if the arguments are not valid in an INI file or the
/// file cannot be read or written.
pub fn set(global: &GlobalOpts, opts: &SetOpts) -> Result<ExitCode> {
    let ini = IniFile::new(&opts.file).with_line_ending(global.new_file_line_ending());
    let outcome = ini
        .write_value(&opts.section, &opts.key, &opts.value)
        .with_context(|| {
            format!(
                "setting [{}] {} in {}",
                opts.section,
                opts.key,
                opts.file.display()
            )
        })?;
    report(&opts.file, outcome);
    Ok(ExitCode::SUCCESS)
}

/// Remove one value, or a whole section when no key is given. Exits with
/// [`NOT_FOUND`](super::NOT_FOUND) when nothing matched.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn unset(opts: &UnsetOpts) -> Result<ExitCode> {
    let outcome = match &opts.key {
        Some(key) => store::remove_value(&opts.file, &opts.section, key),
        None => store::remove_section(&opts.file, &opts.section),
    }
    .with_context(|| format!("updating {}", opts.file.display()))?;

    if outcome == WriteOutcome::Unchanged {
        tracing::warn!("{}: nothing to remove", opts.file.display());
    }
    report(&opts.file, outcome);
    Ok(found_code(outcome == WriteOutcome::Written))
}

/// Write a JSON document into a file, merging by default.
///
/// The `path` field of the JSON document is ignored; the target is always
/// the file named on the command line. With `--replace` the file takes the
/// document's content but keeps its existing line ending.
///
/// # Errors
///
/// Returns an error if the JSON cannot be read or is not a valid document,
/// or the target cannot be read or written.
pub fn import(global: &GlobalOpts, opts: &ImportOpts) -> Result<ExitCode> {
    let text = std::fs::read_to_string(&opts.from)
        .with_context(|| format!("reading {}", opts.from.display()))?;
    let document: Document = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", opts.from.display()))?;

    let ini = IniFile::new(&opts.file).with_line_ending(global.new_file_line_ending());
    let outcome = if opts.replace {
        replace(&ini, document)
    } else {
        ini.merge(&document)
    }
    .with_context(|| format!("writing {}", opts.file.display()))?;

    report(&opts.file, outcome);
    Ok(ExitCode::SUCCESS)
}

fn replace(ini: &IniFile, mut document: Document) -> crate::error::Result<WriteOutcome> {
    let current = ini.load()?;
    document.set_path(Some(ini.path().to_path_buf()));
    document.set_line_ending(current.line_ending());
    document.set_bom(current.has_bom());
    if ini.exists() && current.sections() == document.sections() {
        return Ok(WriteOutcome::Unchanged);
    }
    store::save(&document)?;
    Ok(WriteOutcome::Written)
}

fn report(path: &Path, outcome: WriteOutcome) {
    match outcome {
        WriteOutcome::Written => tracing::info!("{}: updated", path.display()),
        WriteOutcome::Unchanged => tracing::debug!("{}: unchanged", path.display()),
    }
}
