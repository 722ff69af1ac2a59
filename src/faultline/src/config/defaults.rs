use crate::config::config_loader::LogFormat;
use crate::config::Config;
use crate::constants::{
    CORS_ALLOWED_ORIGINS, DEFAULT_DAEMON_PORT, DEFAULT_LOG_LEVEL, DELIVERY_MAX_ATTEMPTS,
    DELIVERY_QUEUE_CAPACITY, DELIVERY_RETRY_DELAY_MS, DELIVERY_TIMEOUT_MS, DELIVERY_WORKERS,
    EVENT_NAME, SHUTDOWN_GRACE_MS, USERNAME,
};

// webhook_url is left empty; `Config::validate` rejects it until one is set
impl Default for Config {
    fn default() -> Self {
        Self {
            server: format!("127.0.0.1:{}", DEFAULT_DAEMON_PORT),
            webhook_url: String::new(),

            delivery_max_attempts: DELIVERY_MAX_ATTEMPTS,
            delivery_retry_delay_ms: DELIVERY_RETRY_DELAY_MS,
            delivery_timeout_ms: DELIVERY_TIMEOUT_MS,
            delivery_queue_capacity: DELIVERY_QUEUE_CAPACITY,
            delivery_workers: DELIVERY_WORKERS,
            shutdown_grace_ms: SHUTDOWN_GRACE_MS,

            event_name: EVENT_NAME.to_string(),
            username: USERNAME.to_string(),
            forward_formatted_reports: false,

            integration_manifest_path: None,
            public_url: None,
            cors_allowed_origins: CORS_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),

            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}
