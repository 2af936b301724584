//! Hourly file writer for the log sink

use crate::logger::error::LoggerError;
use crate::logger::resolver::{LogFile, LogFileResolver};
use crate::logger::stamp::{Clock, system_clock};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Error recovery strategy for handling write failures
///
/// Either way the next hour change retries the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStrategy {
    /// Fallback to stderr when the file cannot be written or reopened
    #[default]
    FallbackToConsole,
    /// Silently drop the log message
    SilentDrop,
}

/// Callback type for error notifications
pub type ErrorCallback = Arc<dyn Fn(&io::Error) + Send + Sync>;

/// Append-only sink that follows the wall-clock hour.
///
/// Every write compares the current bucket key with the one the open handle
/// belongs to and reopens through the resolver when the hour has moved on,
/// also after an earlier failure. A failed hour is not retried until the next one.
/// The handle sits behind a mutex, so one `write` call lands in the file
/// without interleaving with other writers sharing this sink.
#[derive(Clone)]
pub struct HourlyFileWriter {
    state: Arc<Mutex<WriterState>>,
    resolver: LogFileResolver,
    clock: Clock,
    recovery_strategy: RecoveryStrategy,
    error_callback: Option<ErrorCallback>,
}

struct WriterState {
    file: File,
    path: PathBuf,
    bucket: String,
    /// Set once a write or reopen failed under `FallbackToConsole`
    fallback_mode: bool,
    /// Bucket whose file could not be opened
    failed_bucket: Option<String>,
}

impl WriterState {
    fn switch_to(&mut self, log: LogFile) {
        self.file = log.file;
        self.path = log.path;
        self.bucket = log.bucket;
        self.fallback_mode = false;
        self.failed_bucket = None;
    }
}

impl HourlyFileWriter {
    pub fn new(resolver: LogFileResolver) -> Result<Self, LoggerError> {
        Self::with_clock(resolver, system_clock())
    }

    /// Open the file for the clock's current hour
    pub fn with_clock(resolver: LogFileResolver, clock: Clock) -> Result<Self, LoggerError> {
        let LogFile { path, bucket, file } = resolver.open_current(clock())?;

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                path,
                bucket,
                fallback_mode: false,
                failed_bucket: None,
            })),
            resolver,
            clock,
            recovery_strategy: RecoveryStrategy::FallbackToConsole,
            error_callback: None,
        })
    }

    pub fn with_recovery(
        mut self,
        recovery_strategy: RecoveryStrategy,
        error_callback: Option<ErrorCallback>,
    ) -> Self {
        self.recovery_strategy = recovery_strategy;
        self.error_callback = error_callback;
        self
    }

    /// Path of the file currently receiving writes
    pub fn current_path(&self) -> Option<PathBuf> {
        self.state.lock().ok().map(|s| s.path.clone())
    }

    /// True while lines go to stderr or are dropped instead of the file
    pub fn is_degraded(&self) -> bool {
        self.state
            .lock()
            .map(|s| s.fallback_mode || s.failed_bucket.is_some())
            .unwrap_or(true)
    }
}

impl<'a> MakeWriter<'a> for HourlyFileWriter {
    type Writer = HourlyWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        HourlyWriterGuard {
            state: self.state.clone(),
            resolver: self.resolver.clone(),
            clock: self.clock.clone(),
            recovery_strategy: self.recovery_strategy,
            error_callback: self.error_callback.clone(),
        }
    }
}

/// Per-event handle returned by [`HourlyFileWriter`]
pub struct HourlyWriterGuard {
    state: Arc<Mutex<WriterState>>,
    resolver: LogFileResolver,
    clock: Clock,
    recovery_strategy: RecoveryStrategy,
    error_callback: Option<ErrorCallback>,
}

impl Write for HourlyWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        let now = (self.clock)();
        let bucket = match self.resolver.bucket_key(now) {
            Ok(bucket) => bucket,
            Err(e) => return self.handle_write_error(&mut state, buf, io::Error::other(e)),
        };

        if bucket != state.bucket && state.failed_bucket.as_deref() != Some(bucket.as_str()) {
            match self.resolver.open_current(now) {
                Ok(log) => state.switch_to(log),
                Err(e) => {
                    state.failed_bucket = Some(bucket);
                    return self.handle_write_error(&mut state, buf, io::Error::other(e));
                }
            }
        }

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        // Never append to the previous hour's file
        if state.failed_bucket.is_some() {
            return Ok(buf.len());
        }

        match state.file.write_all(buf) {
            Ok(()) => Ok(buf.len()),
            Err(e) => self.handle_write_error(&mut state, buf, e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().flush();
        }

        state.file.flush()
    }
}

impl HourlyWriterGuard {
    fn handle_write_error(
        &self,
        state: &mut WriterState,
        buf: &[u8],
        error: io::Error,
    ) -> io::Result<usize> {
        if let Some(ref callback) = self.error_callback {
            callback(&error);
        }

        match self.recovery_strategy {
            RecoveryStrategy::FallbackToConsole => {
                state.fallback_mode = true;
                eprintln!(
                    "[Logger] File write failed, falling back to stderr: {}",
                    error
                );
                io::stderr().write(buf)
            }
            // Report success so the subscriber keeps going
            RecoveryStrategy::SilentDrop => Ok(buf.len()),
        }
    }
}
