pub const DEFAULT_DAEMON_PORT: u16 = 8722;

pub const DELIVERY_MAX_ATTEMPTS: u64 = 3;
pub const DELIVERY_RETRY_DELAY_MS: u64 = 1000;
pub const DELIVERY_TIMEOUT_MS: u64 = 10_000;
pub const DELIVERY_QUEUE_CAPACITY: u64 = 256;
pub const DELIVERY_WORKERS: u64 = 8;
pub const SHUTDOWN_GRACE_MS: u64 = 5000;

pub const EVENT_NAME: &str = "Error Report";
pub const EVENT_STATUS_SUCCESS: &str = "success";
pub const USERNAME: &str = "Global Error Handler";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
pub const LOG_FILE_NAME: &str = "faultline.log";

pub const CONFIG_ENV_PREFIX: &str = "FAULTLINE";
pub const CONFIG_PATH_ENV_VAR: &str = "FAULTLINE_CONFIG";

pub const API_BASE_PATH: &str = "/api/v1/global-error-handler";

pub const CORS_ALLOWED_ORIGINS: [&str; 4] = [
    "https://telex.im",
    "http://staging.telextest.im",
    "http://telextest.im",
    "https://staging.telex.im",
];

/// Body written to the caller whenever the interceptor handles a failure.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An internal server error occurred. Please try again later.";

// display setting labels understood by the formatter
pub const SETTING_INCLUDE_STACK_TRACE: &str = "Include StackTrace";
pub const SETTING_INCLUDE_INNER_EXCEPTION: &str = "Include InnerException";
pub const SETTING_MAX_MESSAGE_LENGTH: &str = "Max-Error Message-Length";

pub const MAX_STACK_TRACE_LENGTH_FALLBACK: usize = 210;
pub const TRUNCATION_MARKER: &str = "...";
