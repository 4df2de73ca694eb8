//! Structured logging on top of `tracing`.
//!
//! `RUST_LOG`, when set, overrides the configured level.

use crate::config::ObservabilityConfig;
use crate::errors::LoggingError;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Log format for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for machine parsing (production).
    #[default]
    Json,
    /// Human-readable format (development).
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Parse from string, case-insensitive. Defaults to Json for unknown values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "pretty" | "text" | "human" => Self::Pretty,
            _ => Self::Json,
        })
    }
}

/// Parse log level from string. Unknown values map to `INFO`.
pub fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(level: Level, format: LogFormat) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let builder = fmt().with_env_filter(filter);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|e| LoggingError::Init(e.to_string()))
}

/// Install the global tracing subscriber from the observability section of the config.
pub fn init_tracing_from_config(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    // Config already validated; parsing here is lenient.
    let format = config.log_format.parse().unwrap_or_default();
    init_tracing(parse_level(&config.log_level), format)
}
