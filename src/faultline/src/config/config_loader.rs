use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    CONFIG_ENV_PREFIX, CORS_ALLOWED_ORIGINS, DEFAULT_DAEMON_PORT, DEFAULT_LOG_FORMAT,
    DEFAULT_LOG_LEVEL, DELIVERY_MAX_ATTEMPTS, DELIVERY_QUEUE_CAPACITY, DELIVERY_RETRY_DELAY_MS,
    DELIVERY_TIMEOUT_MS, DELIVERY_WORKERS, EVENT_NAME, SHUTDOWN_GRACE_MS, USERNAME,
};
use config::{Config as RConfig, Environment, File, FileFormat};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: String,
    pub webhook_url: String,

    pub delivery_max_attempts: u64,
    pub delivery_retry_delay_ms: u64,
    pub delivery_timeout_ms: u64,
    pub delivery_queue_capacity: u64,
    pub delivery_workers: u64,
    pub shutdown_grace_ms: u64,

    pub event_name: String,
    pub username: String,
    pub forward_formatted_reports: bool,

    pub integration_manifest_path: Option<String>,
    pub public_url: Option<String>,
    pub cors_allowed_origins: Vec<String>,

    pub log_level: String,
    pub log_format: LogFormat,
    pub log_dir: Option<String>,
}

impl Config {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.delivery_retry_delay_ms)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    /// A missing or unusable webhook URL is fatal for delivery.
    pub fn validate(&self) -> Result<()> {
        if self.webhook_url.trim().is_empty() {
            bail!("webhook_url is missing; set it in the config file or {CONFIG_ENV_PREFIX}_WEBHOOK_URL");
        }

        let url = url::Url::parse(self.webhook_url.trim())
            .with_context(|| format!("webhook_url `{}` is not a valid URL", self.webhook_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("webhook_url must use http or https, got `{}`", url.scheme());
        }

        if self.delivery_max_attempts == 0 {
            bail!("delivery_max_attempts must be at least 1");
        }
        if self.delivery_timeout_ms == 0 {
            bail!("delivery_timeout_ms must be at least 1");
        }
        if self.delivery_queue_capacity == 0 || self.delivery_workers == 0 {
            bail!("delivery_queue_capacity and delivery_workers must be at least 1");
        }

        self.server
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("server `{}` is not a socket address", self.server))?;

        Ok(())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = RConfig::builder()
            .set_default("server", format!("127.0.0.1:{}", DEFAULT_DAEMON_PORT))?
            .set_default("webhook_url", "")?
            .set_default("delivery_max_attempts", DELIVERY_MAX_ATTEMPTS)?
            .set_default("delivery_retry_delay_ms", DELIVERY_RETRY_DELAY_MS)?
            .set_default("delivery_timeout_ms", DELIVERY_TIMEOUT_MS)?
            .set_default("delivery_queue_capacity", DELIVERY_QUEUE_CAPACITY)?
            .set_default("delivery_workers", DELIVERY_WORKERS)?
            .set_default("shutdown_grace_ms", SHUTDOWN_GRACE_MS)?
            .set_default("event_name", EVENT_NAME)?
            .set_default("username", USERNAME)?
            .set_default("forward_formatted_reports", false)?
            .set_default("integration_manifest_path", None::<String>)?
            .set_default("public_url", None::<String>)?
            .set_default::<&str, Vec<&str>>("cors_allowed_origins", CORS_ALLOWED_ORIGINS.to_vec())?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("log_format", DEFAULT_LOG_FORMAT)?
            .set_default("log_dir", None::<String>)?;

        Ok(builder)
    }

    /// Defaults, then the optional TOML file, then `FAULTLINE_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut builder = Self::builder()?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors_allowed_origins"),
        );

        let config: Config = builder
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize()
            .context("failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }
}
