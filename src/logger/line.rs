//! Single-line logger
//!
//! Lines carry a date stamp and the concatenated message parts:
//! `{'dateStamp':'2024-03-05 14:07:09','message':'Error on bind: boom'}`.
//! The single-quoted layout is what existing log parsers consume; it is not
//! JSON. `LineFormat::Json` writes the same two keys as valid JSON.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::MakeWriter;

use crate::config::Mode;
use crate::logger::stamp::{Clock, human_stamp, system_clock};
use crate::logger::writer::HourlyFileWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineFormat {
    /// `{'dateStamp':'…','message':'…'}`
    #[default]
    Legacy,
    /// `{"dateStamp":"…","message":"…"}`
    Json,
}

#[derive(Serialize)]
struct LineRecord<'a> {
    #[serde(rename = "dateStamp")]
    date_stamp: &'a str,
    message: &'a str,
}

/// Render one line, without the trailing newline
pub fn format_line(format: LineFormat, date_stamp: &str, message: &str) -> String {
    match format {
        LineFormat::Legacy => format!(
            "{{'dateStamp':'{}','message':'{}'}}",
            date_stamp, message
        ),
        LineFormat::Json => serde_json::to_string(&LineRecord {
            date_stamp,
            message,
        })
        .unwrap_or_default(),
    }
}

/// Writes stamped lines to the console and the hourly sink
///
/// Console echo follows the injected [`Mode`]; the sink, when attached,
/// receives every line regardless of mode.
#[derive(Clone)]
pub struct LineLogger {
    mode: Mode,
    format: LineFormat,
    sink: Option<HourlyFileWriter>,
    clock: Clock,
}

impl LineLogger {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            format: LineFormat::default(),
            sink: None,
            clock: system_clock(),
        }
    }

    pub fn with_format(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_sink(mut self, sink: Option<HourlyFileWriter>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// A sink is attached and currently writes to its file
    pub fn file_sink_active(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.is_degraded())
    }

    /// Format `parts` as a line stamped with the current time
    pub fn line<S: AsRef<str>>(&self, parts: &[S]) -> String {
        let message = parts
            .iter()
            .map(|part| part.as_ref())
            .collect::<Vec<&str>>()
            .concat();
        format_line(self.format, &human_stamp((self.clock)()), &message)
    }

    pub fn log<S: AsRef<str>>(&self, parts: &[S]) {
        let line = self.line(parts);

        if self.mode.echoes_to_console() {
            println!("{}", line);
        }

        if let Some(sink) = &self.sink {
            // One write call per line keeps concurrent lines whole
            let mut record = line.into_bytes();
            record.push(b'\n');
            if let Err(e) = sink.make_writer().write_all(&record) {
                tracing::warn!(error = %e, "Failed to write log line");
            }
        }
    }
}
