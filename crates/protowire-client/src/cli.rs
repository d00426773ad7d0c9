//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use protowire_core::TracingOutputFormat;
use protowire_protocol::{Field, Value};

/// protowire - encode and decode tag/varint records
#[derive(Debug, Parser)]
#[command(name = "protowire")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "PROTOWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log format on stderr: pretty, compact or json
    #[arg(long, env = "PROTOWIRE_LOG_FORMAT")]
    pub log_format: Option<TracingOutputFormat>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode the sample record and print the sample hex dumps (default)
    Demo,

    /// Encode fields given as FIELD=VALUE and print the bytes as hex
    Encode {
        /// Fields in insertion order, e.g. `1=150 2=7`
        #[arg(required = true, value_parser = parse_field)]
        fields: Vec<Field>,

        /// Print lowercase hex
        #[arg(long)]
        lower: bool,

        /// Prefix the record with its varint length
        #[arg(long)]
        delimited: bool,
    },

    /// Decode hex bytes and print the fields
    Decode {
        /// Hex input; whitespace is ignored
        hex: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Input is a stream of length-delimited records
        #[arg(long)]
        delimited: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

/// Parses `FIELD=VALUE` into a varint field.
///
/// Values with a leading `-` are kept signed so the encoder can reject them.
pub fn parse_field(arg: &str) -> Result<Field, String> {
    let (number, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got {:?}", arg))?;

    let number: u32 = number
        .trim()
        .parse()
        .map_err(|e| format!("invalid field number {:?}: {}", number, e))?;

    let value = value.trim();
    let value = if value.starts_with('-') {
        value.parse::<i64>().map(Value::Signed)
    } else {
        value.parse::<u64>().map(Value::Unsigned)
    }
    .map_err(|e| format!("invalid value {:?}: {}", value, e))?;

    Ok(Field::varint(number, value))
}
