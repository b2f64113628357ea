use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

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

const DEFAULT_LEVEL: &str = "info";

/// Event format: local timestamp, level, `crate/file:line`, then fields.
///
/// Colors are only written when the writer supports ANSI escapes.
struct LocalFmt;

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Shortens `tax-core/src/calculations/amount.rs` to `tax-core/calculations/amount.rs`.
fn source_location(path: &str) -> String {
    match path.replace('\\', "/").split_once("/src/") {
        Some((krate, rest)) => format!("{}/{rest}", krate.rsplit('/').next().unwrap_or(krate)),
        None => path.trim_start_matches("src/").to_string(),
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
        let (dim, cyan, reset, level) = if writer.has_ansi_escapes() {
            (DIM, CYAN, RESET, level_color(meta.level()))
        } else {
            ("", "", "", "")
        };

        let now = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        write!(writer, "{dim}{now}{reset} {level}{:>5}{reset} ", meta.level())?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            write!(writer, "{cyan}{}:{line}{reset} ", source_location(file))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Picks the active filter: `RUST_LOG`, then the configured level, then `info`.
fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = level.unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, so stdout stays clean for
///   `--json` output.
/// - File: appended to when `file` is set. The directory must already exist.
pub fn init_logging(
    level: Option<&str>,
    file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let file_layer = file
        .map(|path| {
            File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))
        })
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
