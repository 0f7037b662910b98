//! Console diagnostics for the `inifile` binary.
//!
//! The library only emits [`tracing`] events; this module installs the
//! subscriber that renders them.

mod subscriber;

pub use subscriber::init_subscriber;

/// Environment variable holding `EnvFilter` directives that override `-v`.
pub const LOG_ENV: &str = "INIFILE_LOG";
