//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/protowire/config.toml` by default. Every key is optional:
//!
//! ```toml
//! debug = false
//!
//! [display]
//! case = "upper"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! filter = "protowire_protocol=trace"
//! span_events = false
//! timestamps = true
//!
//! [demo]
//! field_number = 1
//! value = 150
//! hex_literal = [112, 114, 111, 116, 111, 98, 117, 102, 10]
//! utf8_string = "Hello, Protobuf!"
//! ```

use std::path::{Path, PathBuf};

use protowire_core::{HexCase, TracingConfig, TracingOutputFormat};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Configuration for the protowire client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Inputs for the demo command.
    #[serde(default)]
    pub demo: DemoSettings,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Display settings for hex output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Letter case for encoded records.
    pub case: HexCase,
}

/// The record and sample dumps printed by `protowire demo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Field number of the single demo field.
    pub field_number: u32,

    /// Value of the demo field.
    pub value: u64,

    /// Raw bytes shown as a lowercase hex literal.
    pub hex_literal: Vec<u8>,

    /// Text shown as lowercase hex of its UTF-8 bytes.
    pub utf8_string: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            field_number: 1,
            value: 150,
            hex_literal: b"protobuf\n".to_vec(),
            utf8_string: "Hello, Protobuf!".to_string(),
        }
    }
}

/// Log output settings, applied on top of the `--debug` preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level name (`error` .. `trace`); ignored when `filter` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// `pretty`, `compact` or `json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<TracingOutputFormat>,

    /// Full filter directive, e.g. `protowire_protocol=trace`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Log span creation and close.
    pub span_events: bool,

    /// Prefix events with a timestamp.
    pub timestamps: bool,
}

impl LoggingSettings {
    /// Builds the tracing setup: the `--debug` or quiet preset, then these
    /// settings, then a command-line format override.
    pub fn tracing_config(
        &self,
        debug: bool,
        format_override: Option<TracingOutputFormat>,
    ) -> Result<TracingConfig, String> {
        let mut config = if debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::default()
        };

        if let Some(ref level) = self.level {
            let level: Level = level
                .parse()
                .map_err(|e| format!("invalid logging.level {:?}: {}", level, e))?;
            config = config.with_level(level);
        }
        if let Some(format) = format_override.or(self.format) {
            config = config.with_format(format);
        }
        if let Some(ref filter) = self.filter {
            config = config.with_env_filter(filter.clone());
        }

        Ok(config
            .with_span_events(self.span_events)
            .with_timestamp(self.timestamps))
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn load() -> Result<Self, String> {
        Self::load_or_default(&Self::default_path())
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("protowire")
    }
}
