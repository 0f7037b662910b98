//! In-memory INI document model.
//!
//! A [`Document`] is an ordered list of [`Section`]s, each an ordered list of
//! [`Entry`] key/value pairs. Section names and keys compare
//! case-insensitively everywhere (lookup, existence checks, upsert); values
//! compare case-sensitively.
//!
//! Documents are built either by [`parse`] or in code, starting from
//! [`Document::new`]. Nothing is written to disk until the caller saves
//! through [`crate::store`].
pub mod parser;
pub mod serializer;

mod serde_impl;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{IniError, Result};

pub use parser::{ParseWarning, Parsed, WarningKind, parse};
pub use serializer::LineEnding;

/// Compare two names (section names or keys) ignoring case.
///
/// # Examples
///
/// ```
/// use inifile_cli::document::names_match;
///
/// assert!(names_match("Database", "DATABASE"));
/// assert!(names_match("Ärger", "ÄRGER"));
/// assert!(!names_match("host", "hosts"));
/// ```
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A single `key=value` pair within a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    /// Key, with the spelling of its first occurrence.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One `[name]` block of a document.
///
/// Sections returned by the accessor layer are owned copies; changing one
/// never affects the document (or file) it came from.
///
/// # Examples
///
/// ```
/// use inifile_cli::document::Section;
///
/// let mut section = Section::new("DB").unwrap();
/// section.set("host", "localhost").unwrap();
/// section.set("HOST", "db.internal").unwrap();
///
/// assert_eq!(section.len(), 1);
/// assert_eq!(section.get("Host"), Some("db.internal"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    /// Create an empty section.
    ///
    /// Surrounding whitespace is trimmed from `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidSectionName`] if the name is empty or
    /// contains `[`, `]` or a line break.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            name: validate_section_name(name.as_ref())?.to_string(),
            entries: Vec::new(),
        })
    }

    /// Create a section pre-populated with `entries`, upserted in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, any key or any value is invalid.
    pub fn with_entries<I, K, V>(name: impl AsRef<str>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut section = Self::new(name)?;
        for (key, value) in entries {
            section.set(key, value)?;
        }
        Ok(section)
    }

    /// Section name as first encountered.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate over `(key, value)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|e| (e.key.as_str(), e.value.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the section has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key, ignoring case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key)
            .and_then(|i| self.entries.get(i))
            .map(|e| e.value.as_str())
    }

    /// `true` if `key` is present, ignoring case.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Insert or overwrite `key`, returning the previous value.
    ///
    /// An existing entry keeps its position and key spelling; only the value
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidKey`] or [`IniError::InvalidValue`] if the
    /// pair cannot be written as a single `key=value` line.
    pub fn set(
        &mut self,
        key: impl AsRef<str>,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let key = validate_key(key.as_ref())?;
        let value = value.into();
        validate_value(key, &value)?;
        Ok(self.upsert(key, value))
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let i = self.position(key)?;
        Some(self.entries.remove(i).value)
    }

    /// Upsert every entry of `other` into this section.
    pub(crate) fn absorb(&mut self, other: Self) {
        for entry in other.entries {
            self.upsert(&entry.key, entry.value);
        }
    }

    /// Unvalidated upsert shared by [`Section::set`] and the parser.
    pub(crate) fn upsert(&mut self, key: &str, value: String) -> Option<String> {
        if let Some(entry) = self.entries.iter_mut().find(|e| names_match(&e.key, key)) {
            Some(std::mem::replace(&mut entry.value, value))
        } else {
            self.entries.push(Entry {
                key: key.to_string(),
                value,
            });
            None
        }
    }

    /// Create a section from a name that has already been validated.
    pub(crate) fn unchecked(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.entries.iter().position(|e| names_match(&e.key, key))
    }
}

/// A whole INI file held in memory.
///
/// # Examples
///
/// ```
/// use inifile_cli::document::Document;
///
/// let mut doc = Document::new();
/// doc.set("DB", "host", "localhost").unwrap();
/// doc.set("db", "port", "5432").unwrap();
///
/// assert_eq!(doc.section_names().collect::<Vec<_>>(), ["DB"]);
/// assert_eq!(doc.get("Db", "PORT"), Some("5432"));
/// assert_eq!(doc.get("DB", "user"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    line_ending: LineEnding,
    bom: bool,
    sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty in-memory document with no backing path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: None,
            line_ending: LineEnding::native(),
            bom: false,
            sections: Vec::new(),
        }
    }

    /// Create an empty document that will be saved to `path`.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new()
        }
    }

    /// Backing path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set or clear the backing path.
    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    /// Line terminator used when the document is serialized.
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Change the line terminator used when the document is serialized.
    pub const fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Whether the serialized text starts with a UTF-8 byte-order mark.
    #[must_use]
    pub const fn has_bom(&self) -> bool {
        self.bom
    }

    /// Write (or stop writing) a leading UTF-8 byte-order mark.
    pub const fn set_bom(&mut self, bom: bool) {
        self.bom = bom;
    }

    /// Sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    /// `true` if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by name, ignoring case.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        let name = name.trim();
        self.sections.iter().find(|s| names_match(&s.name, name))
    }

    /// Mutable lookup of a section by name, ignoring case.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        let name = name.trim();
        self.sections.iter_mut().find(|s| names_match(&s.name, name))
    }

    /// `true` if a section named `name` exists, ignoring case.
    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Append `section`, or merge its entries into an existing section with
    /// the same name.
    pub fn add_section(&mut self, section: Section) -> &mut Section {
        let index = self.index_or_insert(&section.name);
        #[allow(clippy::indexing_slicing)] // index_or_insert returns a valid position
        let existing = &mut self.sections[index];
        existing.absorb(section);
        existing
    }

    /// Return the section named `name`, appending an empty one if absent.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidSectionName`] if a new section would be
    /// needed and `name` is not a valid section name.
    pub fn section_or_insert(&mut self, name: &str) -> Result<&mut Section> {
        let name = validate_section_name(name)?;
        let index = self.index_or_insert(name);
        #[allow(clippy::indexing_slicing)] // index_or_insert returns a valid position
        let section = &mut self.sections[index];
        Ok(section)
    }

    /// Remove a section, returning it if it was present.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        let name = name.trim();
        let index = self.sections.iter().position(|s| names_match(&s.name, name))?;
        Some(self.sections.remove(index))
    }

    /// Look up a single value.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Upsert a value, creating the section if needed. Returns the previous
    /// value.
    ///
    /// # Errors
    ///
    /// Returns an error if the section name, key or value is invalid. The
    /// document is unchanged in that case.
    pub fn set(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let value = value.into();
        validate_section_name(section)?;
        validate_value(validate_key(key)?, &value)?;
        self.section_or_insert(section)?.set(key, value)
    }

    /// Remove a single value, returning it if it was present.
    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.section_mut(section)?.remove(key)
    }

    /// Upsert every section and entry of `other` into this document.
    ///
    /// Sections and entries only present here are kept.
    pub fn merge(&mut self, other: &Self) {
        for section in &other.sections {
            self.add_section(section.clone());
        }
    }

    /// Position of the section named `name`, appending it first if absent.
    fn index_or_insert(&mut self, name: &str) -> usize {
        if let Some(i) = self.sections.iter().position(|s| names_match(&s.name, name)) {
            i
        } else {
            self.sections.push(Section::unchecked(name));
            self.sections.len() - 1
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serializer::write_section(f, self, LineEnding::Lf)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serializer::write_document(f, self)
    }
}

/// Check a section name, returning it trimmed.
pub(crate) fn validate_section_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    let reason = if trimmed.is_empty() {
        "must not be empty"
    } else if trimmed.contains(['[', ']']) {
        "must not contain '[' or ']'"
    } else if trimmed.contains(['\r', '\n']) {
        "must not contain line breaks"
    } else {
        return Ok(trimmed);
    };
    Err(IniError::InvalidSectionName {
        name: name.to_string(),
        reason,
    })
}

/// Check a key, returning it trimmed.
pub(crate) fn validate_key(key: &str) -> Result<&str> {
    let trimmed = key.trim();
    let reason = if trimmed.is_empty() {
        "must not be empty"
    } else if trimmed.contains('=') {
        "must not contain '='"
    } else if trimmed.contains(['\r', '\n']) {
        "must not contain line breaks"
    } else if trimmed.starts_with('[') {
        "must not start with '['"
    } else if trimmed.starts_with(';') {
        "must not start with ';'"
    } else {
        return Ok(trimmed);
    };
    Err(IniError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}

pub(crate) fn validate_value(key: &str, value: &str) -> Result<()> {
    if value.contains(['\r', '\n']) {
        return Err(IniError::InvalidValue {
            key: key.to_string(),
            reason: "must not contain line breaks",
        });
    }
    Ok(())
}
