//! JSON (and any other serde format) support for [`Document`] and [`Section`].
//!
//! Entries are written as an ordered map so the output reads like the file:
//!
//! ```json
//! { "path": "app.ini", "sections": [ { "name": "DB", "entries": { "host": "localhost" } } ] }
//! ```
//!
//! Deserialization goes through the same validation as building a document
//! in code, and merges sections whose names differ only in case.
use std::fmt;
use std::path::PathBuf;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Document, Section};
use crate::error::IniError;

/// Borrowed view serializing a section's entries as a map.
struct Entries<'a>(&'a Section);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Section", 2)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("entries", &Entries(self))?;
        state.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Document", 2)?;
        state.serialize_field("path", &self.path())?;
        state.serialize_field("sections", self.sections())?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSection {
    name: String,
    #[serde(default, deserialize_with = "ordered_entries")]
    entries: Vec<(String, String)>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    sections: Vec<RawSection>,
}

fn section_from_raw(raw: RawSection) -> Result<Section, IniError> {
    Section::with_entries(raw.name, raw.entries)
}

fn document_from_raw(raw: RawDocument) -> Result<Document, IniError> {
    let mut document = Document::new();
    document.set_path(raw.path);
    for section in raw.sections {
        document.add_section(section_from_raw(section)?);
    }
    Ok(document)
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        section_from_raw(RawSection::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        document_from_raw(RawDocument::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

/// Collect a map into a `Vec`, keeping the order it was written in.
fn ordered_entries<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of string keys to string values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}
