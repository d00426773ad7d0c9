//! Configuration commands.

use std::io::Write;

use protowire_protocol::MAX_FIELD_NUMBER;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration.
pub fn dump(config: &ClientConfig, out: &mut impl Write) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    writeln!(out, "# config.toml ({})", ClientConfig::default_path().display())?;
    writeln!(out, "{}", toml_str)?;

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig, out: &mut impl Write) -> ClientResult<()> {
    let number = config.demo.field_number;
    if number == 0 || number > MAX_FIELD_NUMBER {
        return Err(ClientError::Config(format!(
            "demo.field_number must be between 1 and {}, got {}",
            MAX_FIELD_NUMBER, number
        )));
    }

    config
        .logging
        .tracing_config(config.debug, None)
        .map_err(ClientError::Config)?;

    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Show the configuration file path.
pub fn path(out: &mut impl Write) -> ClientResult<()> {
    writeln!(out, "config: {}", ClientConfig::default_path().display())?;
    Ok(())
}
