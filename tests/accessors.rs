#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the path-level accessors in [`inifile_cli::store`].
//!
//! Each test works on real files in a temporary directory and checks both
//! what the accessors return and what ends up on disk.

mod common;

use common::{IntegrationTestContext, TestContextBuilder};
use inifile_cli::document::{Document, LineEnding, WarningKind, parse, serializer};
use inifile_cli::error::IniError;
use inifile_cli::store::{self, IniFile, Source, WriteOutcome};

const DB: &str = "[DB]\nhost=localhost\nport=5432\n";

// ---------------------------------------------------------------------------
// Snapshot: serializer output
// ---------------------------------------------------------------------------

/// Snapshot of a representative document as written to disk.
#[test]
fn serialized_document() {
    let mut doc = Document::new();
    doc.set_line_ending(LineEnding::Lf);
    doc.set("Database", "Host", "db.internal").unwrap();
    doc.set("Database", "Port", "5432").unwrap();
    doc.set("Database", "Url", "postgres://u:p@db/app?sslmode=require").unwrap();
    doc.set("Paths", "Home", "C:\\Users\\app").unwrap();
    doc.set("Paths", "Empty", "").unwrap();
    doc.section_or_insert("Reserved").unwrap();

    let text = serializer::to_string(&doc);
    insta::assert_snapshot!("serialized_document", text.trim_end());
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn db_scenario() {
    let ctx = TestContextBuilder::new().with_file("app.ini", DB).build();
    let path = ctx.path("app.ini");

    assert_eq!(
        store::read_value(&path, "DB", "port").unwrap().as_deref(),
        Some("5432")
    );
    assert_eq!(
        store::write_value(&path, "DB", "port", "5433").unwrap(),
        WriteOutcome::Written
    );
    assert_eq!(
        store::read_value(&path, "DB", "port").unwrap().as_deref(),
        Some("5433")
    );
    assert_eq!(store::section_names(&path).unwrap(), ["DB"]);
    assert_eq!(ctx.read("app.ini"), "[DB]\nhost=localhost\nport=5433\n");
}

#[test]
fn write_value_creates_file_with_one_section_and_entry() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.path("new.ini");

    store::write_value(&path, "Main", "key", "value").unwrap();

    let document = store::load(&path).unwrap().expect("file was created");
    assert_eq!(document.sections().len(), 1);
    assert_eq!(document.sections()[0].len(), 1);
    assert_eq!(document.get("Main", "key"), Some("value"));
}

#[test]
fn malformed_line_is_skipped_with_warning() {
    let ctx = TestContextBuilder::new()
        .with_file("app.ini", "[S]\na=1\ngarbage-no-equals\nb=2\n")
        .build();
    let path = ctx.path("app.ini");

    let parsed = store::load_with_warnings(&path).unwrap().unwrap();
    assert_eq!(parsed.document.get("S", "a"), Some("1"));
    assert_eq!(parsed.document.get("S", "b"), Some("2"));
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].line, 3);
    assert_eq!(parsed.warnings[0].kind, WarningKind::Malformed);

    assert_eq!(store::read_value(&path, "S", "b").unwrap().as_deref(), Some("2"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn write_value_is_idempotent() {
    let ctx = TestContextBuilder::new().with_file("app.ini", DB).build();
    let path = ctx.path("app.ini");

    store::write_value(&path, "DB", "user", "admin").unwrap();
    let once = ctx.read("app.ini");
    assert_eq!(
        store::write_value(&path, "DB", "user", "admin").unwrap(),
        WriteOutcome::Unchanged
    );
    assert_eq!(ctx.read("app.ini"), once);
}

#[test]
fn lookups_ignore_case() {
    let ctx = TestContextBuilder::new()
        .with_file("app.ini", "[Sec]\nKey=Value\n")
        .build();
    let path = ctx.path("app.ini");

    let a = store::read_value(&path, "Sec", "Key").unwrap();
    let b = store::read_value(&path, "SEC", "key").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_deref(), Some("Value"));
    assert!(store::section_exists(&path, "sEc").unwrap());
}

#[test]
fn first_equals_splits_key_from_value() {
    let parsed = parse("[S]\nkey=a=b=c\n");
    assert_eq!(parsed.document.get("S", "key"), Some("a=b=c"));
}

#[test]
fn empty_section_differs_from_missing_section() {
    let ctx = TestContextBuilder::new()
        .with_file("app.ini", "[Empty]\n[Full]\nk=v\n")
        .build();
    let path = ctx.path("app.ini");

    let empty = store::read_section(&path, "Empty").unwrap();
    assert!(empty.expect("empty section is present").is_empty());
    assert!(store::read_section(&path, "Absent").unwrap().is_none());
}

#[test]
fn empty_value_differs_from_missing_key() {
    let ctx = TestContextBuilder::new()
        .with_file("app.ini", "[S]\nblank=\n")
        .build();
    let path = ctx.path("app.ini");

    assert_eq!(store::read_value(&path, "S", "blank").unwrap().as_deref(), Some(""));
    assert_eq!(store::read_value(&path, "S", "absent").unwrap(), None);
}

#[test]
fn parse_serialize_round_trip() {
    let text = "[Main]\nName=Widget\nUrl=a=b\n[Empty]\n[Other]\nFlag=\n";
    let first = parse(text).document;
    let second = parse(&serializer::to_string(&first)).document;
    assert_eq!(first.sections(), second.sections());
}

// ---------------------------------------------------------------------------
// File handling
// ---------------------------------------------------------------------------

#[test]
fn crlf_file_stays_crlf() {
    let ctx = TestContextBuilder::new()
        .with_file("win.ini", "[S]\r\na=1\r\n")
        .build();
    let path = ctx.path("win.ini");

    store::write_value(&path, "S", "a", "2").unwrap();
    assert_eq!(ctx.read("win.ini"), "[S]\r\na=2\r\n");
}

#[test]
fn failed_write_leaves_prior_content() {
    let ctx = TestContextBuilder::new()
        .with_file("app.ini", DB)
        .with_file("blocker", "not a directory")
        .build();

    let result = store::write_value(&ctx.path("blocker").join("app.ini"), "DB", "k", "v");
    assert!(matches!(result, Err(IniError::Io { .. })));
    assert_eq!(ctx.read("blocker"), "not a directory");
    assert_eq!(ctx.read("app.ini"), DB);
    assert_eq!(ctx.file_names(), ["app.ini", "blocker"]);
}

#[cfg(unix)]
#[test]
fn read_only_file_is_not_replaced() {
    use std::os::unix::fs::PermissionsExt as _;
    let ctx = TestContextBuilder::new().with_file("app.ini", DB).build();
    let path = ctx.path("app.ini");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

    assert!(matches!(
        store::write_value(&path, "DB", "port", "5433"),
        Err(IniError::Io { .. })
    ));
    assert_eq!(ctx.read("app.ini"), DB);
    assert_eq!(ctx.file_names(), ["app.ini"]);
}

#[cfg(unix)]
#[test]
fn write_through_symlink_updates_target() {
    let ctx = TestContextBuilder::new().with_file("real.ini", DB).build();
    let link = ctx.path("link.ini");
    std::os::unix::fs::symlink(ctx.path("real.ini"), &link).unwrap();

    store::write_value(&link, "DB", "port", "5433").unwrap();
    assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(ctx.read("real.ini"), "[DB]\nhost=localhost\nport=5433\n");
}

#[test]
fn invalid_utf8_is_an_error_and_file_is_untouched() {
    let ctx = TestContextBuilder::new()
        .with_file("latin1.ini", b"[S]\nname=caf\xe9\n")
        .build();
    let path = ctx.path("latin1.ini");

    assert!(matches!(
        store::write_value(&path, "S", "k", "v"),
        Err(IniError::Encoding { .. })
    ));
    assert_eq!(
        std::fs::read(&path).unwrap(),
        b"[S]\nname=caf\xe9\n".to_vec()
    );
}

#[test]
fn byte_order_mark_survives_rewrite() {
    let ctx = TestContextBuilder::new()
        .with_file("bom.ini", "\u{feff}[S]\r\na=1\r\n")
        .build();
    let path = ctx.path("bom.ini");

    assert_eq!(store::section_names(&path).unwrap(), ["S"]);
    store::write_value(&path, "S", "b", "2").unwrap();
    assert_eq!(ctx.read("bom.ini"), "\u{feff}[S]\r\na=1\r\nb=2\r\n");
}

#[test]
fn rewrite_drops_unparsed_lines() {
    let ctx = TestContextBuilder::new()
        .with_file("app.ini", "; header\n[S]\n\na=1\n; note\n")
        .build();
    store::write_value(&ctx.path("app.ini"), "S", "b", "2").unwrap();
    assert_eq!(ctx.read("app.ini"), "[S]\na=1\nb=2\n");
}

#[test]
fn merge_into_keeps_unrelated_entries() {
    let ctx = TestContextBuilder::new().with_file("app.ini", DB).build();
    let path = ctx.path("app.ini");

    let mut update = Document::new();
    update.set("db", "PORT", "6543").unwrap();
    update.set("Cache", "ttl", "60").unwrap();

    assert_eq!(store::merge_into(&path, &update).unwrap(), WriteOutcome::Written);
    assert_eq!(
        ctx.read("app.ini"),
        "[DB]\nhost=localhost\nport=6543\n[Cache]\nttl=60\n"
    );
}

#[test]
fn document_built_in_code_saves_and_reloads() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.path("nested/dir/app.ini");

    let mut doc = Document::with_path(&path);
    doc.set("A", "x", "1").unwrap();
    store::save(&doc).unwrap();

    let back = store::file_map(&path).unwrap();
    assert_eq!(back.sections(), doc.sections());
    assert_eq!(back.path(), Some(path.as_path()));
}

#[test]
fn source_serves_path_and_document_callers() {
    let ctx = TestContextBuilder::new().with_file("app.ini", DB).build();
    let path = ctx.path("app.ini");
    let document = store::file_map(&path).unwrap();

    for source in [Source::from(path.as_path()), Source::from(&document)] {
        assert_eq!(source.section_names().unwrap(), ["DB"]);
        assert_eq!(source.value("db", "HOST").unwrap().as_deref(), Some("localhost"));
    }
}

#[test]
fn ini_file_handle_round_trip() {
    let ctx = IntegrationTestContext::new();
    let ini = IniFile::new(ctx.path("handle.ini")).with_line_ending(LineEnding::Lf);

    ini.write_value("S", "a", "1").unwrap();
    ini.write_value("S", "b", "2").unwrap();
    assert!(ini.section_exists("s").unwrap());
    assert_eq!(ini.read_value("S", "B").unwrap().as_deref(), Some("2"));
    assert_eq!(ini.remove_value("S", "a").unwrap(), WriteOutcome::Written);
    assert_eq!(ini.read_section("S").unwrap().unwrap().len(), 1);
    assert_eq!(ini.remove_section("S").unwrap(), WriteOutcome::Written);
    assert!(ini.section_names().unwrap().is_empty());
    assert_eq!(ctx.read("handle.ini"), "");
}
