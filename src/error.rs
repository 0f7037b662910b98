//! Domain-specific error types for INI file access.
//!
//! This module provides a structured error type using [`thiserror`]. Library
//! code returns [`IniError`]; command handlers at the CLI boundary convert it
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! Only I/O failures and invalid arguments are errors. A missing file, a
//! missing section or a missing key is an ordinary `None`, and malformed lines
//! are collected as [`ParseWarning`](crate::document::ParseWarning)s.

use std::io;
use std::path::Path;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, IniError>;

/// Errors that arise from reading, validating or persisting INI documents.
#[derive(Error, Debug)]
pub enum IniError {
    /// Reading or writing the backing file failed (other than "not found").
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path of the file being read or written.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The backing file is not valid UTF-8.
    #[error("{path} is not valid UTF-8: {source}")]
    Encoding {
        /// Path of the file that could not be decoded.
        path: String,
        /// Underlying decoding error.
        source: FromUtf8Error,
    },

    /// A section name is empty or contains forbidden characters.
    #[error("Invalid section name {name:?}: {reason}")]
    InvalidSectionName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// A key is empty or contains forbidden characters.
    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the key was rejected.
        reason: &'static str,
    },

    /// A value cannot be represented on a single INI line.
    #[error("Invalid value for key {key:?}: {reason}")]
    InvalidValue {
        /// Key the value was meant for.
        key: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A document without a backing path was asked to save itself.
    #[error("Document has no path to save to")]
    MissingPath,
}

impl IniError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn encoding(path: &Path, source: FromUtf8Error) -> Self {
        Self::Encoding {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn io_display_names_path() {
        let e = IniError::io(
            Path::new("/etc/app.ini"),
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(e.to_string().contains("/etc/app.ini"));
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn io_has_source() {
        let e = IniError::io(Path::new("app.ini"), io::Error::other("disk full"));
        assert!(e.source().is_some());
    }

    #[test]
    fn encoding_has_source() {
        let bad = String::from_utf8(vec![0xFF, 0xFE, 0x00]).expect_err("invalid UTF-8");
        let e = IniError::encoding(Path::new("app.ini"), bad);
        assert!(e.to_string().starts_with("app.ini is not valid UTF-8"));
        assert!(e.source().is_some());
    }

    #[test]
    fn invalid_section_name_display() {
        let e = IniError::InvalidSectionName {
            name: String::new(),
            reason: "must not be empty",
        };
        assert_eq!(e.to_string(), "Invalid section name \"\": must not be empty");
    }

    #[test]
    fn invalid_key_display() {
        let e = IniError::InvalidKey {
            key: "a=b".to_string(),
            reason: "must not contain '='",
        };
        assert_eq!(e.to_string(), "Invalid key \"a=b\": must not contain '='");
    }

    #[test]
    fn invalid_value_display() {
        let e = IniError::InvalidValue {
            key: "motd".to_string(),
            reason: "must not contain line breaks",
        };
        assert_eq!(
            e.to_string(),
            "Invalid value for key \"motd\": must not contain line breaks"
        );
    }

    #[test]
    fn missing_path_display() {
        assert_eq!(
            IniError::MissingPath.to_string(),
            "Document has no path to save to"
        );
    }

    #[test]
    fn converts_to_anyhow() {
        let _anyhow_err: anyhow::Error = IniError::MissingPath.into();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn ini_error_is_send_sync() {
        assert_send_sync::<IniError>();
    }
}
