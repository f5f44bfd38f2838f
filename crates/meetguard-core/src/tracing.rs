//! Tracing setup for meetguard.
//!
//! The check run logs to a single append-only file, one line per event:
//!
//! ```text
//! 2024-01-10 09:00:00 | meetguard_cli::check | DEBUG | "Planning" meeting append to list
//! ```
//!
//! The subscriber is installed with [`tracing::subscriber::set_default`], so
//! it only lives as long as the returned guard.
//!
//! ```ignore
//! use meetguard_core::tracing::{init_tracing, LogConfig};
//!
//! let _guard = init_tracing(&LogConfig::new("/var/log/meetguard.log"))?;
//! ```

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use thiserror::Error;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

/// Crates whose events are recorded at the configured level.
const LOG_TARGETS: &[&str] = &[
    "meetguard",
    "meetguard_cli",
    "meetguard_core",
    "meetguard_providers",
    "meetguard_notify",
];

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// The log file (or its directory) could not be opened.
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Append-only log file.
    pub file: PathBuf,
    /// The default level when RUST_LOG is not set
    pub default_level: Level,
    /// Also write log lines to stderr.
    pub mirror_stderr: bool,
    /// Custom env filter directive (overrides default_level if set)
    pub env_filter: Option<String>,
}

impl LogConfig {
    /// Creates a DEBUG-level file-only config.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            default_level: Level::DEBUG,
            mirror_stderr: false,
            env_filter: None,
        }
    }

    /// Set the default log level
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Mirror log lines to stderr.
    #[must_use]
    pub fn with_stderr(mut self, mirror: bool) -> Self {
        self.mirror_stderr = mirror;
        self
    }

    /// Set a custom env filter directive
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(ref filter) = self.env_filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let directives = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.default_level))
            .collect::<Vec<_>>()
            .join(",");
        Ok(EnvFilter::try_new(directives)?)
    }
}

/// Line format `timestamp | logger-name | level | message`.
///
/// The logger name is the event's tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeFormat;

impl<S, N> FormatEvent<S, N> for PipeFormat
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
        let metadata = event.metadata();
        write!(
            writer,
            "{} | {} | {} | ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            metadata.target(),
            metadata.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn open_log_file(config: &LogConfig) -> Result<File, TracingError> {
    let wrap = |source| TracingError::LogFile {
        path: config.file.clone(),
        source,
    };
    if let Some(parent) = config.file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(wrap)
}

/// Installs the run's subscriber on the current thread.
///
/// The subscriber stays active until the returned guard is dropped.
/// `RUST_LOG` overrides the default level.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or the env filter
/// directive is invalid.
pub fn init_tracing(config: &LogConfig) -> Result<DefaultGuard, TracingError> {
    let filter = config.build_filter()?;
    let file = open_log_file(config)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(PipeFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let stderr_layer = config.mirror_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(PipeFormat)
            .with_writer(io::stderr)
            .boxed()
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer);

    Ok(tracing::subscriber::set_default(subscriber))
}
