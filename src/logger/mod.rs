//! Logger Module
//!
//! - Hour-bucketed log files resolved next to the running binary
//! - A `MakeWriter` sink that follows the wall-clock hour
//! - Stamped single-line logging with mode-dependent console echo
//! - `tracing-subscriber` setup writing to the console and the sink
//! - A configurable policy for sink setup failures (abort or console-only)

pub mod config;
pub mod error;
pub mod line;
pub mod resolver;
pub mod stamp;
pub(crate) mod writer;

#[cfg(test)]
mod tests;

pub use self::config::*;
pub use self::error::LoggerError;
pub use self::line::{LineFormat, LineLogger, format_line};
pub use self::resolver::{LogFile, LogFileResolver, ResolveStage};
pub use self::writer::{ErrorCallback, HourlyFileWriter, RecoveryStrategy};

use anyhow::Context;
use std::io::IsTerminal;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Open the hourly sink described by `config`
///
/// Returns `Ok(None)` when file output is disabled, or when setup failed and
/// the policy is [`SetupFailurePolicy::ConsoleOnly`].
pub fn setup_log_sink(config: &LoggerConfig) -> Result<Option<HourlyFileWriter>, LoggerError> {
    if !config.file.enabled {
        return Ok(None);
    }

    let resolver = config.file.resolver();
    warn_on_split_directories(&resolver);
    let sink = open_sink(resolver, config.on_setup_failure)?;

    Ok(sink.map(|writer| writer.with_recovery(config.file.on_write_failure, None)))
}

/// Open a sink through `resolver`, applying `policy` on failure
pub fn open_sink(
    resolver: LogFileResolver,
    policy: SetupFailurePolicy,
) -> Result<Option<HourlyFileWriter>, LoggerError> {
    match HourlyFileWriter::new(resolver) {
        Ok(writer) => Ok(Some(writer)),
        Err(e) => match policy {
            SetupFailurePolicy::Abort => Err(e),
            SetupFailurePolicy::ConsoleOnly => {
                eprintln!("[Logger] Log file setup failed, continuing console-only: {}", e);
                Ok(None)
            }
        },
    }
}

// The directory is created under the working directory while files are
// opened next to the binary; the open fails when the two differ.
fn warn_on_split_directories(resolver: &LogFileResolver) {
    let (Ok(cwd), Ok(exe_dir)) = (
        std::env::current_dir(),
        resolver.resolve_executable_directory(),
    ) else {
        return;
    };

    let same = match (cwd.canonicalize(), exe_dir.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => cwd == exe_dir,
    };

    if !same && !exe_dir.join(resolver.dir_name()).is_dir() {
        eprintln!(
            "[Logger] Working directory {} differs from executable directory {}; \
             log files are opened under the latter",
            cwd.display(),
            exe_dir.display()
        );
    }
}

/// Install the global `tracing` subscriber
///
/// Returns the hourly sink (if any) so other writers can share it.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<Option<HourlyFileWriter>> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let sink = setup_log_sink(config)?;

    // File layer goes first so console ANSI settings do not leak into the file.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if let Some(writer) = &sink {
        layers.push(file_layer(config.file.format, writer.clone()));
    }
    if config.console.enabled || sink.is_none() {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(sink)
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(format: LogFormat, writer: HourlyFileWriter) -> BoxedLayer {
    match format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    }
}
