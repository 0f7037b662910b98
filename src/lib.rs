//! Read and write Windows-style INI configuration files.
//!
//! Files are flat `[section]` headers followed by `key=value` lines. Section
//! names and keys compare case-insensitively; values are kept as written.
//!
//! The public API is organised into layers:
//!
//! - **[`document`]**: the in-memory model, parser and serializer
//! - **[`store`]**: stateless accessors keyed by file path, and the atomic
//!   file I/O they go through
//! - **[`commands`]** and **[`cli`]**: the `inifile` binary's front-end
//!
//! ```
//! use inifile_cli::document::{Document, LineEnding};
//!
//! let mut doc = Document::new();
//! doc.set_line_ending(LineEnding::Lf);
//! doc.set("DB", "host", "localhost").unwrap();
//! doc.set("db", "PORT", "5432").unwrap();
//!
//! assert_eq!(doc.to_string(), "[DB]\nhost=localhost\nPORT=5432\n");
//! ```
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod document;
pub mod error;
pub mod logging;
pub mod store;
