use super::commands::{Cli, Command};
use crate::config::ConfigLoader;
use crate::constants::CONFIG_PATH_ENV_VAR;
use crate::daemon::{shutdown_signal, DaemonServer};
use crate::logging::setup_logging;
use crate::report::{process_format_request, FormatRequest};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Process the command line.
pub fn process_command() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve(config_path(cli.config)),
        Command::Format { input } => {
            let request = read_format_request(&input)?;
            let report = process_format_request(&request)?;
            print!("{report}");
            Ok(())
        }
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn config_path(flag: Option<String>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var(CONFIG_PATH_ENV_VAR).ok())
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}

fn serve(config_path: Option<PathBuf>) -> Result<()> {
    let config = ConfigLoader::load(config_path.as_deref())?;
    setup_logging(&config)?;

    tokio::runtime::Runtime::new()
        .context("Failed to start the async runtime")?
        .block_on(async move {
            let server = DaemonServer::bind(config).await?;
            let cancellation_token = CancellationToken::new();
            tokio::spawn(shutdown_signal(cancellation_token.clone()));
            server.run(cancellation_token).await
        })
}

/// Reads a format request from a file, or stdin when `input` is `-`.
pub fn read_format_request(input: &str) -> Result<FormatRequest> {
    let raw = if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read format request from stdin")?;
        raw
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read format request {input}"))?
    };

    serde_json::from_str(&raw).context("Format request is not valid JSON")
}
