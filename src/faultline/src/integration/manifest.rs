use crate::config::Config;
use crate::constants::{
    API_BASE_PATH, MAX_STACK_TRACE_LENGTH_FALLBACK, SETTING_INCLUDE_INNER_EXCEPTION,
    SETTING_INCLUDE_STACK_TRACE, SETTING_MAX_MESSAGE_LENGTH,
};
use crate::daemon::FORMAT_MESSAGE_ENDPOINT;
use crate::report::DisplaySetting;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Where the platform should POST format requests.
pub fn target_url(config: &Config) -> String {
    let base = config
        .public_url
        .as_deref()
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| format!("http://{}", config.server));
    format!("{base}{API_BASE_PATH}{FORMAT_MESSAGE_ENDPOINT}")
}

pub fn builtin_manifest(config: &Config) -> Value {
    let max_length = i64::try_from(MAX_STACK_TRACE_LENGTH_FALLBACK).unwrap_or(i64::MAX);
    let settings = vec![
        DisplaySetting::checkbox(SETTING_INCLUDE_STACK_TRACE, true)
            .with_required(true)
            .with_description("Append the captured stack trace to each report"),
        DisplaySetting::checkbox(SETTING_INCLUDE_INNER_EXCEPTION, true)
            .with_required(true)
            .with_description("Append the underlying cause when there is one"),
        DisplaySetting::number(SETTING_MAX_MESSAGE_LENGTH, max_length)
            .with_required(false)
            .with_description("Truncate stack traces to this many characters"),
    ];

    json!({
        "data": {
            "descriptions": {
                "app_name": config.username,
                "app_description": "Captures unhandled server errors and reports them to a channel webhook.",
                "app_url": config.public_url,
                "background_color": "#fff"
            },
            "integration_category": "Monitoring & Logging",
            "integration_type": "modifier",
            "is_active": true,
            "key_features": [
                "Reports every unhandled error with its request context",
                "Optional stack traces and inner error messages",
                "Retries webhook delivery before giving up"
            ],
            "settings": settings,
            "target_url": target_url(config)
        }
    })
}

/// Resolves the descriptor once at startup.
///
/// `Ok(None)` means the configured file is missing or empty; the endpoint then
/// answers 404. A file that exists but is not JSON is a startup error.
pub fn load_manifest(config: &Config) -> Result<Option<Value>> {
    let Some(path) = config.integration_manifest_path.as_deref() else {
        debug!("No integration manifest configured, serving the built-in one");
        return Ok(Some(builtin_manifest(config)));
    };

    let path = Path::new(path);
    if !path.exists() {
        warn!("Integration manifest {} not found", path.display());
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read integration manifest {}", path.display()))?;
    if raw.trim().is_empty() {
        warn!("Integration manifest {} is empty", path.display());
        return Ok(None);
    }

    let manifest = serde_json::from_str(&raw)
        .with_context(|| format!("Integration manifest {} is not valid JSON", path.display()))?;
    Ok(Some(manifest))
}
