//! Section and value accessors keyed by file path.
//!
//! Every function here takes the path explicitly and holds no state between
//! calls. Reads treat a missing file as empty. Writes load the current file
//! (or start an empty document), apply the change and persist through
//! [`fs::write_atomic`], so readers never observe a half-written file and a
//! failed write leaves the previous content in place.
//!
//! Writers in independent processes are not coordinated: no file lock is
//! taken around load-modify-save, and the last writer wins.
//!
//! # Examples
//!
//! ```
//! use inifile_cli::store;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("app.ini");
//!
//! store::write_value(&path, "DB", "port", "5432").unwrap();
//! assert_eq!(store::read_value(&path, "db", "PORT").unwrap().as_deref(), Some("5432"));
//! assert_eq!(store::read_value(&path, "DB", "host").unwrap(), None);
//! ```
pub mod fs;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::document::{
    self, Document, LineEnding, Parsed, Section, serializer, validate_key,
    validate_section_name, validate_value,
};
use crate::error::{IniError, Result};

/// Result of a write operation.
///
/// # Examples
///
/// ```
/// use inifile_cli::store::WriteOutcome;
///
/// assert_ne!(WriteOutcome::Written, WriteOutcome::Unchanged);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced.
    Written,
    /// The file already had the requested content and was not touched.
    Unchanged,
}

/// Where a read operation gets its document from.
///
/// Lets one API serve callers holding a file name and callers holding an
/// already-loaded [`Document`]. A path is loaded once per call, when the
/// source is resolved.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Load the file at this path (missing file reads as empty).
    Path(&'a Path),
    /// Use a document already in memory.
    Document(&'a Document),
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a Document> for Source<'a> {
    fn from(document: &'a Document) -> Self {
        Self::Document(document)
    }
}

impl<'a> Source<'a> {
    /// Produce the document, loading it if this is a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn resolve(self) -> Result<Cow<'a, Document>> {
        match self {
            Self::Path(path) => file_map(path).map(Cow::Owned),
            Self::Document(document) => Ok(Cow::Borrowed(document)),
        }
    }

    /// Section names in document order.
    ///
    /// # Errors
    ///
    /// See [`Source::resolve`].
    pub fn section_names(self) -> Result<Vec<String>> {
        Ok(self
            .resolve()?
            .section_names()
            .map(str::to_string)
            .collect())
    }

    /// An owned copy of the named section, or `None` if absent.
    ///
    /// # Errors
    ///
    /// See [`Source::resolve`].
    pub fn section(self, name: &str) -> Result<Option<Section>> {
        Ok(self.resolve()?.section(name).cloned())
    }

    /// A single value, or `None` if the section or key is absent.
    ///
    /// # Errors
    ///
    /// See [`Source::resolve`].
    pub fn value(self, section: &str, key: &str) -> Result<Option<String>> {
        Ok(self.resolve()?.get(section, key).map(str::to_string))
    }
}

/// Load and parse `path`, logging any skipped lines.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not UTF-8.
pub fn load(path: &Path) -> Result<Option<Document>> {
    let Some(parsed) = load_with_warnings(path)? else {
        return Ok(None);
    };
    for warning in &parsed.warnings {
        tracing::warn!("{}: skipped {warning}", path.display());
    }
    Ok(Some(parsed.document))
}

/// Load and parse `path`, returning the skipped lines to the caller instead
/// of logging them.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not UTF-8.
pub fn load_with_warnings(path: &Path) -> Result<Option<Parsed>> {
    let Some(text) = fs::read_text(path)? else {
        tracing::debug!("{} does not exist", path.display());
        return Ok(None);
    };
    let mut parsed = document::parse(&text);
    parsed.document.set_path(Some(path.to_path_buf()));
    tracing::debug!(
        "loaded {} section(s) from {}",
        parsed.document.sections().len(),
        path.display()
    );
    Ok(Some(parsed))
}

/// Write `document` to its own path, replacing the file.
///
/// # Errors
///
/// Returns [`IniError::MissingPath`] for an in-memory document, or an I/O
/// error if the file cannot be written.
pub fn save(document: &Document) -> Result<()> {
    let path = document.path().ok_or(IniError::MissingPath)?;
    save_as(document, path)
}

/// Write `document` to `path`, replacing the file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn save_as(document: &Document, path: &Path) -> Result<()> {
    tracing::debug!(
        "saving {} section(s) to {}",
        document.sections().len(),
        path.display()
    );
    fs::write_atomic(path, &serializer::to_string(document))
}

/// Section names in file order; empty if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or decoded.
pub fn section_names(path: &Path) -> Result<Vec<String>> {
    Source::Path(path).section_names()
}

/// `true` if the file has a section named `name` (ignoring case).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or decoded.
pub fn section_exists(path: &Path, name: &str) -> Result<bool> {
    Ok(Source::Path(path).resolve()?.contains_section(name))
}

/// An owned copy of one section. `None` means the section is absent; a
/// present section with no entries is `Some` and empty.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or decoded.
pub fn read_section(path: &Path, name: &str) -> Result<Option<Section>> {
    Source::Path(path).section(name)
}

/// A single value. `None` means the file, section or key is absent, which is
/// distinct from a key whose value is empty.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or decoded.
pub fn read_value(path: &Path, section: &str, key: &str) -> Result<Option<String>> {
    Source::Path(path).value(section, key)
}

/// Upsert one value and persist the file, creating the file and the section
/// if needed.
///
/// # Errors
///
/// Returns an error for an invalid section name, key or value (before any
/// I/O), or if the file cannot be read or written. On error the file is
/// unchanged.
pub fn write_value(path: &Path, section: &str, key: &str, value: &str) -> Result<WriteOutcome> {
    write_value_in(path, LineEnding::native(), section, key, value)
}

/// Remove one value and persist the file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn remove_value(path: &Path, section: &str, key: &str) -> Result<WriteOutcome> {
    let Some(mut document) = load(path)? else {
        return Ok(WriteOutcome::Unchanged);
    };
    if document.remove(section, key).is_none() {
        return Ok(WriteOutcome::Unchanged);
    }
    tracing::debug!("removing [{section}] {key} from {}", path.display());
    persist(&document, path)
}

/// Remove a whole section and persist the file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn remove_section(path: &Path, name: &str) -> Result<WriteOutcome> {
    let Some(mut document) = load(path)? else {
        return Ok(WriteOutcome::Unchanged);
    };
    if document.remove_section(name).is_none() {
        return Ok(WriteOutcome::Unchanged);
    }
    tracing::debug!("removing [{name}] from {}", path.display());
    persist(&document, path)
}

/// Upsert every entry of `document` into the file at `path`, keeping
/// whatever else the file already contains, and persist once.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn merge_into(path: &Path, document: &Document) -> Result<WriteOutcome> {
    merge_into_in(path, LineEnding::native(), document)
}

/// The whole file as a [`Document`], parsed once. A missing file yields an
/// empty document that will be saved to `path`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or decoded.
pub fn file_map(path: &Path) -> Result<Document> {
    Ok(load(path)?.unwrap_or_else(|| Document::with_path(path)))
}

/// A file path plus the line ending to use if the file has to be created.
///
/// Methods delegate to the free functions of this module.
///
/// # Examples
///
/// ```
/// use inifile_cli::store::{IniFile, WriteOutcome};
///
/// let dir = tempfile::tempdir().unwrap();
/// let ini = IniFile::new(dir.path().join("app.ini"));
///
/// assert!(!ini.exists());
/// assert_eq!(ini.write_value("DB", "host", "localhost").unwrap(), WriteOutcome::Written);
/// assert_eq!(ini.write_value("DB", "host", "localhost").unwrap(), WriteOutcome::Unchanged);
/// assert_eq!(ini.section_names().unwrap(), ["DB"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniFile {
    path: PathBuf,
    new_file_line_ending: LineEnding,
}

impl IniFile {
    /// Handle for `path`. New files use the platform line ending.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            new_file_line_ending: LineEnding::native(),
        }
    }

    /// Use `line_ending` if the file has to be created. Existing files keep
    /// their own convention.
    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.new_file_line_ending = line_ending;
        self
    }

    /// The backing path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` if the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// See [`file_map`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(&self) -> Result<Document> {
        let mut document = file_map(&self.path)?;
        if document.is_empty() && !self.exists() {
            document.set_line_ending(self.new_file_line_ending);
        }
        Ok(document)
    }

    /// See [`section_names`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn section_names(&self) -> Result<Vec<String>> {
        section_names(&self.path)
    }

    /// See [`section_exists`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn section_exists(&self, name: &str) -> Result<bool> {
        section_exists(&self.path, name)
    }

    /// See [`read_section`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn read_section(&self, name: &str) -> Result<Option<Section>> {
        read_section(&self.path, name)
    }

    /// See [`read_value`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn read_value(&self, section: &str, key: &str) -> Result<Option<String>> {
        read_value(&self.path, section, key)
    }

    /// See [`write_value`].
    ///
    /// # Errors
    ///
    /// Returns an error for invalid arguments or if the file cannot be read
    /// or written.
    pub fn write_value(&self, section: &str, key: &str, value: &str) -> Result<WriteOutcome> {
        write_value_in(&self.path, self.new_file_line_ending, section, key, value)
    }

    /// See [`remove_value`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn remove_value(&self, section: &str, key: &str) -> Result<WriteOutcome> {
        remove_value(&self.path, section, key)
    }

    /// See [`remove_section`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn remove_section(&self, name: &str) -> Result<WriteOutcome> {
        remove_section(&self.path, name)
    }

    /// See [`merge_into`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn merge(&self, document: &Document) -> Result<WriteOutcome> {
        merge_into_in(&self.path, self.new_file_line_ending, document)
    }
}

fn load_or_new(path: &Path, line_ending: LineEnding) -> Result<Document> {
    Ok(load(path)?.unwrap_or_else(|| {
        let mut document = Document::with_path(path);
        document.set_line_ending(line_ending);
        document
    }))
}

fn write_value_in(
    path: &Path,
    line_ending: LineEnding,
    section: &str,
    key: &str,
    value: &str,
) -> Result<WriteOutcome> {
    validate_section_name(section)?;
    validate_value(validate_key(key)?, value)?;

    let mut document = load_or_new(path, line_ending)?;
    if path.exists() && document.get(section, key) == Some(value) {
        tracing::debug!("[{section}] {key} already set in {}", path.display());
        return Ok(WriteOutcome::Unchanged);
    }
    tracing::debug!("writing [{section}] {key}={value} to {}", path.display());
    document.set(section, key, value)?;
    persist(&document, path)
}

fn merge_into_in(path: &Path, line_ending: LineEnding, update: &Document) -> Result<WriteOutcome> {
    let mut document = load_or_new(path, line_ending)?;
    let before = document.sections().to_vec();
    document.merge(update);
    if path.exists() && document.sections() == before.as_slice() {
        return Ok(WriteOutcome::Unchanged);
    }
    tracing::debug!(
        "merging {} section(s) into {}",
        update.sections().len(),
        path.display()
    );
    persist(&document, path)
}

fn persist(document: &Document, path: &Path) -> Result<WriteOutcome> {
    save_as(document, path)?;
    Ok(WriteOutcome::Written)
}
