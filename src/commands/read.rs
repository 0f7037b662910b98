//! Commands: `sections`, `section`, `get`, `show`.
use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use super::found_code;
use crate::cli::{GetOpts, SectionOpts, SectionsOpts, ShowOpts};
use crate::document::Document;
use crate::store::{self, Source};

/// Print section names, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn sections(opts: &SectionsOpts, out: &mut impl Write) -> Result<ExitCode> {
    let names = store::section_names(&opts.file)
        .with_context(|| format!("reading {}", opts.file.display()))?;
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the requested sections. Missing sections are reported and the
/// exit code is non-zero.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn section(opts: &SectionOpts, out: &mut impl Write) -> Result<ExitCode> {
    let document = store::file_map(&opts.file)
        .with_context(|| format!("reading {}", opts.file.display()))?;
    let source = Source::from(&document);

    let mut found = Vec::with_capacity(opts.sections.len());
    let mut all_found = true;
    for name in &opts.sections {
        if let Some(section) = source.section(name)? {
            found.push(section);
        } else {
            tracing::warn!("{}: no section [{name}]", opts.file.display());
            all_found = false;
        }
    }

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &found)?;
        writeln!(out)?;
    } else {
        for section in &found {
            write!(out, "{section}")?;
        }
    }
    Ok(found_code(all_found))
}

/// Print a single value.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn get(opts: &GetOpts, out: &mut impl Write) -> Result<ExitCode> {
    let value = store::read_value(&opts.file, &opts.section, &opts.key)
        .with_context(|| format!("reading {}", opts.file.display()))?;
    if let Some(value) = &value {
        writeln!(out, "{value}")?;
    } else {
        tracing::debug!(
            "{}: [{}] {} is not set",
            opts.file.display(),
            opts.section,
            opts.key
        );
    }
    Ok(found_code(value.is_some()))
}

/// Print whole files. Files that do not exist are reported and skipped.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read.
pub fn show(opts: &ShowOpts, out: &mut impl Write) -> Result<ExitCode> {
    let mut documents = Vec::with_capacity(opts.files.len());
    for file in &opts.files {
        match store::load(file).with_context(|| format!("reading {}", file.display()))? {
            Some(document) => documents.push(document),
            None => tracing::warn!("{}: file not found, skipping", file.display()),
        }
    }

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &documents)?;
        writeln!(out)?;
    } else {
        write_documents(&documents, out)?;
    }
    Ok(found_code(documents.len() == opts.files.len()))
}

/// INI text for each document, headed by its path when there are several.
fn write_documents(documents: &[Document], out: &mut impl Write) -> Result<()> {
    let headed = documents.len() > 1;
    for (i, document) in documents.iter().enumerate() {
        if headed {
            if i > 0 {
                writeln!(out)?;
            }
            let path = document.path().map(|p| p.display().to_string()).unwrap_or_default();
            writeln!(out, "==> {path} <==")?;
        }
        for section in document.sections() {
            write!(out, "{section}")?;
        }
    }
    Ok(())
}
