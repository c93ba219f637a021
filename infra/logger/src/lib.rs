//! # Logger
//!
//! `tracing` subscriber setup for ironseal binaries.
//!
//! Configuration is a plain [`LogConfig`] value so it can be loaded from the same layered
//! config sources as the rest of the application. Console output always goes to **stderr**:
//! stdout belongs to the command output (tokens, payloads) and must stay machine-readable.
//!
//! ## Example
//!
//! ```rust
//! use ironseal_logger::{LogConfig, Logger};
//!
//! let config = LogConfig { level: "debug".to_owned(), ..LogConfig::default() };
//! let _logger = Logger::init("my-app", &config).unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Rolling policy for file output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(value: LogRotation) -> Self {
        match value {
            LogRotation::Minutely => Self::MINUTELY,
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
            LogRotation::Never => Self::NEVER,
        }
    }
}

/// Logging settings, usually the `[log]` table of the application config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Emit compact, colored records on stderr.
    pub console: bool,
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub level: String,
    /// Extra directives such as `ironseal=trace`. `RUST_LOG` is used when unset.
    pub env_filter: Option<String>,
    /// Directory for rolling log files. File output is disabled when unset.
    pub directory: Option<PathBuf>,
    pub rotation: LogRotation,
    pub max_files: usize,
    /// Write file records as JSON lines.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console: true,
            level: "info".to_owned(),
            env_filter: None,
            directory: None,
            rotation: LogRotation::Daily,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

impl LogConfig {
    /// Parses [`LogConfig::level`] into a [`LevelFilter`].
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for unknown level names.
    pub fn level_filter(&self) -> Result<LevelFilter, LoggerError> {
        LevelFilter::from_str(&self.level).map_err(|_| LoggerError::InvalidConfiguration {
            message: format!("Unknown log level '{}'", self.level).into(),
            context: None,
        })
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background worker guard of the file writer. Keep it alive until shutdown,
/// dropping it flushes the pending records.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Installs the global tracing subscriber described by `config`.
    ///
    /// `name` prefixes rolling log files (e.g. `ironseal.2026-10-17.log`).
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, an unknown
    ///   level, an invalid filter, or when no output is enabled.
    /// * [`LoggerError::Appender`] if the rolling file appender cannot be created.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(name: &str, config: &LogConfig) -> Result<Self, LoggerError> {
        validate_config(name, config)?;

        let filter = build_env_filter(config)?;
        let mut layers = Vec::new();

        if config.console {
            layers.push(layer().compact().with_writer(std::io::stderr).boxed());
        }

        let guard = if let Some(directory) = &config.directory {
            fs::create_dir_all(directory).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", directory.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(config.rotation.into())
                .filename_prefix(name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(config.max_files)
                .build(directory)
                .context("Building rolling file appender")?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if config.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable console or set a directory.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Self { guard })
    }

    /// Returns the file writer guard, if file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(name: &str, config: &LogConfig) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.directory.is_some() && config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level_filter()?.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}
