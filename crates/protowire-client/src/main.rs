//! protowire CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use protowire_client::cli::{Cli, Command, ConfigAction};
use protowire_client::commands;
use protowire_client::config::ClientConfig;
use protowire_client::error::{ClientError, ClientResult};
use protowire_core::{HexCase, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration; a file that exists but does not parse is fatal
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    }
    .map_err(ClientError::Config)?;

    // Initialize tracing
    let tracing_config = config
        .logging
        .tracing_config(cli.debug || config.debug, cli.log_format)
        .map_err(ClientError::Config)?;
    init_tracing(tracing_config)?;
    tracing::debug!(config = ?cli.config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Handle subcommands
    match cli.command {
        None | Some(Command::Demo) => commands::demo::run(&config, &mut out),
        Some(Command::Encode {
            fields,
            lower,
            delimited,
        }) => {
            let case = if lower {
                HexCase::Lower
            } else {
                config.display.case
            };
            commands::codec::encode_fields(&fields, case, delimited, &mut out)
        }
        Some(Command::Decode {
            hex,
            json,
            delimited,
        }) => commands::codec::decode_hex_input(&hex, json, delimited, &mut out),
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &mut out),
            ConfigAction::Validate => commands::config::validate(&config, &mut out),
            ConfigAction::Path => commands::config::path(&mut out),
        },
    }
}
