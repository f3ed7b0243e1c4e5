//! # Logging
//!
//! Installs the process-wide `tracing` subscriber once at startup.
//!
//! Every event is written to stderr as one `[LEVEL] message field=value ...`
//! line. When systemd has connected stderr to the journal (`JOURNAL_STREAM`
//! is set, as under a service unit), each line also starts with a `<N>`
//! syslog priority, which journald strips and records as the entry's
//! `PRIORITY`. The journal `MESSAGE` is then the formatted line itself.

use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::SobrError;

/// Set by systemd when stdout/stderr are connected to the journal
pub const JOURNAL_STREAM_ENV: &str = "JOURNAL_STREAM";

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// stderr is a journal stream
    Journal,
    /// plain stderr (terminal, container)
    Stderr,
}

impl LogSink {
    /// Journal if systemd handed us a journal stream, stderr otherwise.
    pub fn detect() -> Self {
        if std::env::var_os(JOURNAL_STREAM_ENV).is_some() {
            LogSink::Journal
        } else {
            LogSink::Stderr
        }
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init() -> Result<LogSink, SobrError> {
    let sink = LogSink::detect();

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LevelPrefix::for_sink(sink))
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| SobrError::Logging(e.to_string()))?;

    Ok(sink)
}

/// Event formatter producing `[LEVEL] message field=value` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelPrefix {
    /// Prepend the `<N>` syslog priority understood by journald
    syslog_priority: bool,
}

impl LevelPrefix {
    pub fn for_sink(sink: LogSink) -> Self {
        Self {
            syslog_priority: sink == LogSink::Journal,
        }
    }
}

/// Syslog priority of a `tracing` level.
///
/// | Level | Priority |
/// |-------|----------|
/// | ERROR | 3 (err) |
/// | WARN | 4 (warning) |
/// | INFO | 6 (info) |
/// | DEBUG, TRACE | 7 (debug) |
fn syslog_priority(level: &Level) -> u8 {
    match *level {
        Level::ERROR => 3,
        Level::WARN => 4,
        Level::INFO => 6,
        _ => 7,
    }
}

impl<S, N> FormatEvent<S, N> for LevelPrefix
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = event.metadata().level();
        if self.syslog_priority {
            write!(writer, "<{}>", syslog_priority(level))?;
        }
        write!(writer, "[{}] ", level)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Capture formatted log lines in memory.
#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::Subscriber;

    use super::LevelPrefix;

    #[derive(Clone, Default)]
    pub struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Subscriber writing `format` lines into the returned buffer.
    pub fn subscriber(format: LevelPrefix) -> (impl Subscriber + Send + Sync + 'static, Captured) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(format)
            .with_writer(move || writer.clone())
            .finish();
        (subscriber, captured)
    }
}
