//! Logging bootstrap.
//!
//! Configures the `tracing-subscriber` infrastructure for host applications
//! embedding the bridge. Filtering honors `RUST_LOG` unless explicit
//! directives are given.
//!
//! ## Usage
//!
//! ```no_run
//! use core_screentime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! init_logging(LoggingConfig::default().with_format(LogFormat::Compact))
//!     .expect("logging initialized once per process");
//! tracing::info!("bridge starting");
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter directives; falls back to `RUST_LOG`, then `info`
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }
}

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
#[error("failed to initialize logging: {0}")]
pub struct LoggingInitError(String);

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed or the filter directives do
/// not parse.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingInitError> {
    let filter = match &config.filter {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|err| LoggingInitError(err.to_string()))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|err| LoggingInitError(err.to_string()))
}
