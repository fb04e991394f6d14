use std::{
    fs::File,
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "warn";

/// Where and how much to log.
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    /// Bare level ("debug") or a full EnvFilter directive. Takes precedence
    /// over `RUST_LOG`.
    pub filter: Option<String>,
    /// Optional file receiving a plain-text copy of every record.
    pub file: Option<PathBuf>,
}

// --- Formatter ---

/// `<timestamp> <LEVEL> <file:line> <fields>` with a local timestamp.
struct LocalFmt;

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m ",
                level_colour(meta.level()),
                meta.level()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} ", meta.level())?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file);
            write!(writer, "{file}:{line} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Public API ---

fn make_filter(explicit: Option<&str>) -> Result<EnvFilter> {
    match explicit {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// - stderr: coloured when attached to a terminal, plain when piped. Stdout
///   is left to command output.
/// - file: appended to when `settings.file` is set.
pub fn init(settings: &LogSettings) -> Result<()> {
    let filter = make_filter(settings.filter.as_deref())?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match &settings.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
