//! Logging setup for protowire binaries.
//!
//! Everything is written to stderr; stdout carries only command output such
//! as hex dumps.
//!
//! ```ignore
//! use protowire_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::default().with_format(TracingOutputFormat::Json))?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self as tfmt, format::FmtSpan},
    prelude::*,
};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Line format for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracingOutputFormat {
    /// Multi-line, human oriented
    Pretty,
    /// One line per event
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

impl fmt::Display for TracingOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

impl FromStr for TracingOutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown log format {:?} (expected pretty, compact or json)",
                other
            )),
        }
    }
}

/// How logging is set up by [`init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for `protowire*` targets when neither `env_filter` nor
    /// `RUST_LOG` is set
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Add file and line to each event
    pub include_location: bool,
    /// Add the module path to each event
    pub include_target: bool,
    pub include_timestamp: bool,
    /// Log span creation and close
    pub include_span_events: bool,
    /// Filter directive, takes precedence over `RUST_LOG`
    pub env_filter: Option<String>,
}

/// Warnings only, compact, no decoration.
impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            include_timestamp: false,
            include_span_events: false,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// Debug level with locations, for `--debug`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.include_span_events = enabled;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.include_timestamp = enabled;
        self
    }
}

/// Installs the global subscriber described by `config`.
///
/// Call once, before any event is logged.
///
/// # Errors
///
/// Fails if a global subscriber is already set or the filter directive does
/// not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = build_filter(&config)?;
    let subscriber = tracing_subscriber::registry()
        .with(build_layer(&config))
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Explicit directive, then `RUST_LOG`, then `protowire=<default_level>`.
fn build_filter(config: &TracingConfig) -> Result<EnvFilter, TracingError> {
    if let Some(ref filter) = config.env_filter {
        return Ok(EnvFilter::try_new(filter)?);
    }
    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("protowire={}", config.default_level))))
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// The fmt layer for the configured format, writing to stderr.
fn build_layer(config: &TracingConfig) -> BoxedLayer {
    let span_events = if config.include_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = tfmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target)
        .with_span_events(span_events);

    match (config.output_format, config.include_timestamp) {
        (TracingOutputFormat::Pretty, true) => base.pretty().boxed(),
        (TracingOutputFormat::Pretty, false) => base.pretty().without_time().boxed(),
        (TracingOutputFormat::Compact, true) => base.compact().boxed(),
        (TracingOutputFormat::Compact, false) => base.compact().without_time().boxed(),
        (TracingOutputFormat::Json, true) => base.json().boxed(),
        (TracingOutputFormat::Json, false) => base.json().without_time().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet_compact() {
        let config = TracingConfig::default();
        assert_eq!(config.default_level, Level::WARN);
        assert_eq!(config.output_format, TracingOutputFormat::Compact);
        assert!(!config.include_target);
        assert!(!config.include_timestamp);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn cli_debug_adds_location() {
        let config = TracingConfig::cli_debug();
        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.output_format, TracingOutputFormat::Compact);
        assert!(config.include_location);
        assert!(config.include_target);
    }

    #[test]
    fn builder_methods() {
        let config = TracingConfig::default()
            .with_level(Level::INFO)
            .with_format(TracingOutputFormat::Json)
            .with_env_filter("protowire_protocol=trace")
            .with_span_events(true)
            .with_timestamp(true);

        assert_eq!(config.default_level, Level::INFO);
        assert_eq!(config.output_format, TracingOutputFormat::Json);
        assert_eq!(config.env_filter.as_deref(), Some("protowire_protocol=trace"));
        assert!(config.include_span_events);
        assert!(config.include_timestamp);
    }

    #[test]
    fn output_format_parse_and_display() {
        for format in [
            TracingOutputFormat::Pretty,
            TracingOutputFormat::Compact,
            TracingOutputFormat::Json,
        ] {
            assert_eq!(format.to_string().parse(), Ok(format));
        }
        assert_eq!("JSON".parse(), Ok(TracingOutputFormat::Json));
        assert!("yaml".parse::<TracingOutputFormat>().is_err());
    }

    #[test]
    fn explicit_filter_is_validated() {
        let config = TracingConfig::default().with_env_filter("protowire=loud");
        assert!(matches!(
            build_filter(&config),
            Err(TracingError::EnvFilter(_))
        ));

        let config = TracingConfig::default().with_env_filter("protowire=debug");
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn every_format_builds_a_layer() {
        for format in [
            TracingOutputFormat::Pretty,
            TracingOutputFormat::Compact,
            TracingOutputFormat::Json,
        ] {
            for timestamp in [true, false] {
                let config = TracingConfig::default()
                    .with_format(format)
                    .with_timestamp(timestamp)
                    .with_span_events(true);
                let _layer = build_layer(&config);
            }
        }
    }
}
