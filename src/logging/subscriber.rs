//! Tracing subscriber setup: console formatter and initialisation.
use std::io::IsTerminal as _;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use super::LOG_ENV;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits one short line per
/// event, prefixed by its level for warnings and errors.
pub(super) struct InifileFormatter {
    pub(super) ansi: bool,
}

impl InifileFormatter {
    fn paint<'a>(&self, code: &str, text: &'a str) -> std::borrow::Cow<'a, str> {
        if self.ansi {
            format!("\x1b[{code}m{text}\x1b[0m").into()
        } else {
            text.into()
        }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for InifileFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match *event.metadata().level() {
            tracing::Level::ERROR => writeln!(writer, "{} {msg}", self.paint("31", "ERROR")),
            tracing::Level::WARN => writeln!(writer, "{}  {msg}", self.paint("33", "WARN")),
            tracing::Level::INFO => writeln!(writer, "{msg}"),
            _ => writeln!(writer, "{}", self.paint("2", msg)),
        }
    }
}

/// Level used when `INIFILE_LOG` is not set.
pub(super) const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Build the event filter: `INIFILE_LOG` when set and valid, otherwise the
/// level chosen by the verbosity flag.
pub(super) fn build_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::default().add_directive(default_level(verbose).into());
    match directives {
        Some(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| fallback())
        }
        _ => fallback(),
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// All diagnostics go to stderr so stdout carries only command output.
/// `INIFILE_LOG` (an `EnvFilter` directive string such as
/// `inifile_cli=debug`) overrides the `verbose` flag.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let directives = std::env::var(LOG_ENV).ok();
    let console_layer = fmt::layer()
        .event_format(InifileFormatter {
            ansi: std::io::stderr().is_terminal(),
        })
        .with_writer(std::io::stderr)
        .with_filter(build_filter(verbose, directives.as_deref()));

    tracing_subscriber::registry().with(console_layer).init();
}
