//! Render a [`Document`] back to INI text.
//!
//! Output is deterministic: each section as `[name]` followed by its entries
//! as `key=value`, in stored order, every line terminated by the document's
//! [`LineEnding`]. No blank lines are emitted.
use std::fmt;

use super::{Document, Section};

/// Byte-order mark some editors prepend to UTF-8 files.
pub(crate) const UTF8_BOM: char = '\u{feff}';

/// Line terminator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The platform convention: CRLF on Windows, LF elsewhere.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) { Self::CrLf } else { Self::Lf }
    }

    /// Detect the convention used by `text`.
    ///
    /// Returns `None` when the text contains no line break at all.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let first = text.find('\n')?;
        if text.get(..first).is_some_and(|line| line.ends_with('\r')) {
            Some(Self::CrLf)
        } else {
            Some(Self::Lf)
        }
    }

    /// The terminator itself.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Serialize `document` using its own line ending.
///
/// # Examples
///
/// ```
/// use inifile_cli::document::{Document, LineEnding, serializer};
///
/// let mut doc = Document::new();
/// doc.set_line_ending(LineEnding::CrLf);
/// doc.set("DB", "port", "5432").unwrap();
///
/// assert_eq!(serializer::to_string(&doc), "[DB]\r\nport=5432\r\n");
/// ```
#[must_use]
pub fn to_string(document: &Document) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, document);
    out
}

/// Write the whole document, byte-order mark included, to `out`.
pub(crate) fn write_document<W: fmt::Write>(out: &mut W, document: &Document) -> fmt::Result {
    if document.has_bom() {
        out.write_char(UTF8_BOM)?;
    }
    for section in document.sections() {
        write_section(out, section, document.line_ending())?;
    }
    Ok(())
}

/// Write one section (header and entries) to `out`.
pub(crate) fn write_section<W: fmt::Write>(
    out: &mut W,
    section: &Section,
    line_ending: LineEnding,
) -> fmt::Result {
    let eol = line_ending.as_str();
    write!(out, "[{}]{eol}", section.name())?;
    for (key, value) in section.iter() {
        write!(out, "{key}={value}{eol}")?;
    }
    Ok(())
}
