use super::error::{DeliveryOutcome, WebhookForwardError};
use super::payload::WebhookPayload;
use super::retry::{self, RetryPolicy};
use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};
use url::Url;

/// HTTP client that pushes error reports to a webhook
#[derive(Clone)]
pub struct WebhookForward {
    endpoint: String,
    client: Client,
    policy: RetryPolicy,
}

impl WebhookForward {
    pub fn try_new(endpoint: &str, policy: RetryPolicy, timeout: Duration) -> Result<Self> {
        let url = Url::parse(endpoint.trim())
            .with_context(|| format!("Webhook endpoint `{}` is not a valid URL", endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Webhook endpoint must use http or https, got `{}`", url.scheme());
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build webhook HTTP client")?;

        Ok(Self {
            endpoint: url.to_string(),
            client,
            policy,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::try_new(
            &config.webhook_url,
            RetryPolicy::from(config),
            config.delivery_timeout(),
        )
    }

    /// Deliver one payload. Never fails: the outcome is logged and returned.
    pub async fn deliver(&self, payload: &WebhookPayload) -> DeliveryOutcome {
        let start_time = Instant::now();

        let body = match payload.to_json() {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to serialize error report, dropping it: {}", e);
                return DeliveryOutcome::Exhausted {
                    attempts: 0,
                    last_error: WebhookForwardError::Serialization(e),
                };
            }
        };

        let outcome = retry::send_with_retry(&self.client, &self.endpoint, body, self.policy).await;

        debug!(
            "Webhook delivery finished after {} attempt(s) in {:?}",
            outcome.attempts(),
            start_time.elapsed()
        );
        outcome
    }
}
