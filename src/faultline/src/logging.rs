use crate::config::{Config, LogFormat};
use crate::constants::LOG_FILE_NAME;
use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

pub fn setup_logging(config: &Config) -> Result<()> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level `{}`", config.log_level))?;

    let stdout_layer = match config.log_format {
        LogFormat::Pretty => fmt::layer().with_target(true).with_timer(SystemTime).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_timer(SystemTime)
            .boxed(),
    };

    let file_layer = config.log_dir.as_ref().map(|log_dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);

        fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_timer(SystemTime)
            .with_writer(file_appender)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    match &config.log_dir {
        Some(log_dir) => tracing::info!(
            "Logging system initialized. Writing to {}/{}",
            log_dir,
            LOG_FILE_NAME
        ),
        None => tracing::info!("Logging system initialized"),
    }

    Ok(())
}
