//! Line-oriented INI parser.
//!
//! Format:
//! ```ini
//! [SectionName]
//! Key1=Value1
//! Key2=a=b=c
//! ```
//!
//! Parsing never fails. Lines that cannot be understood are skipped and
//! reported as [`ParseWarning`]s so the caller can decide what to do with
//! them. There is no comment syntax: a `;` line is skipped like any other
//! malformed line and is not preserved on save.
use std::fmt;

use super::serializer::{LineEnding, UTF8_BOM};
use super::{Document, Section, names_match};

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Not a header and no `=` to split on.
    Malformed,
    /// A `[...]` header whose name is empty or contains brackets or a line break.
    InvalidSectionName,
    /// A `=value` line with nothing before the `=`.
    EmptyKey,
    /// A `;` line. These are not treated as comments.
    SemicolonLine,
    /// A `key=value` line before the first section header.
    OutsideSection,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => "malformed line".fmt(f),
            Self::InvalidSectionName => "invalid section header".fmt(f),
            Self::EmptyKey => "entry without a key".fmt(f),
            Self::SemicolonLine => "';' line is not a comment".fmt(f),
            Self::OutsideSection => "entry outside of any section".fmt(f),
        }
    }
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line: usize,
    /// The offending line, trimmed.
    pub content: String,
    /// What was wrong with it.
    pub kind: WarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.content)
    }
}

/// The result of a parse: the document plus any skipped lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Parsed document (no backing path).
    pub document: Document,
    /// Lines that were skipped, in file order.
    pub warnings: Vec<ParseWarning>,
}

/// Current-section context while scanning lines.
#[derive(Debug, Clone, Copy)]
enum State {
    NoSection,
    InSection(usize),
}

/// One classified line.
enum Line<'a> {
    Blank,
    Header(&'a str),
    Entry(&'a str, &'a str),
    Skip(WarningKind),
}

/// Parse INI text into a [`Document`].
///
/// Accepts LF and CRLF line endings; the document remembers which one the
/// text used so it is written back the same way.
///
/// # Examples
///
/// ```
/// use inifile_cli::document::parse;
///
/// let parsed = parse("[DB]\nhost = localhost\nurl=a=b=c\ngarbage\n");
/// let doc = parsed.document;
///
/// assert_eq!(doc.get("db", "HOST"), Some("localhost"));
/// assert_eq!(doc.get("DB", "url"), Some("a=b=c"));
/// assert_eq!(parsed.warnings.len(), 1);
/// ```
#[must_use]
pub fn parse(text: &str) -> Parsed {
    let stripped = text.strip_prefix(UTF8_BOM);
    let text = stripped.unwrap_or(text);
    let mut document = Document::new();
    document.set_bom(stripped.is_some());
    document.set_line_ending(LineEnding::detect(text).unwrap_or_else(LineEnding::native));
    let mut warnings = Vec::new();
    let mut state = State::NoSection;

    for (line_num, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        let kind = match classify(trimmed) {
            Line::Blank => continue,
            Line::Header(name) => {
                state = State::InSection(open_section(&mut document, name));
                continue;
            }
            Line::Entry(key, value) => match state {
                State::InSection(index) => {
                    if let Some(section) = document.sections.get_mut(index) {
                        section.upsert(key, value.to_string());
                    }
                    continue;
                }
                State::NoSection => WarningKind::OutsideSection,
            },
            Line::Skip(kind) => kind,
        };
        warnings.push(ParseWarning {
            line: line_num + 1,
            content: trimmed.to_string(),
            kind,
        });
    }

    Parsed { document, warnings }
}

/// Classify a trimmed line.
fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with(';') {
        return Line::Skip(WarningKind::SemicolonLine);
    }
    if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
        let name = inner.trim();
        if name.is_empty() || name.contains(['[', ']', '\r', '\n']) {
            return Line::Skip(WarningKind::InvalidSectionName);
        }
        return Line::Header(name);
    }
    match line.split_once('=') {
        Some((key, _)) if key.trim().is_empty() => Line::Skip(WarningKind::EmptyKey),
        Some((key, value)) => Line::Entry(key.trim(), value.trim()),
        None => Line::Skip(WarningKind::Malformed),
    }
}

/// Find or append the section named `name` and return its position.
fn open_section(document: &mut Document, name: &str) -> usize {
    if let Some(index) = document
        .sections
        .iter()
        .position(|section| names_match(section.name(), name))
    {
        return index;
    }
    document.sections.push(Section::unchecked(name));
    document.sections.len() - 1
}
