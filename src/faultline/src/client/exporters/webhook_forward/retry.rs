use super::error::{DeliveryOutcome, WebhookForwardError};
use crate::config::Config;
use crate::constants::{DELIVERY_MAX_ATTEMPTS, DELIVERY_RETRY_DELAY_MS};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Bounded attempts with a fixed pause in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u64,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DELIVERY_MAX_ATTEMPTS,
            delay: Duration::from_millis(DELIVERY_RETRY_DELAY_MS),
        }
    }
}

impl From<&Config> for RetryPolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.delivery_max_attempts.max(1),
            delay: config.retry_delay(),
        }
    }
}

/// Send a serialized report, retrying every failure until the policy runs out
pub(super) async fn send_with_retry(
    client: &Client,
    endpoint: &str,
    body: Vec<u8>,
    policy: RetryPolicy,
) -> DeliveryOutcome {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let start_time = Instant::now();

        let e = match send_request(client, endpoint, body.clone()).await {
            Ok(response_body) => {
                info!(
                    "Error report successfully sent to webhook on attempt {}: {}",
                    attempt, response_body
                );
                return DeliveryOutcome::Delivered { attempts: attempt };
            }
            Err(e) => e,
        };

        match &e {
            WebhookForwardError::Server { status, .. } => warn!(
                "Attempt {}: webhook rejected error report. Status code: {}, elapsed: {:?}",
                attempt,
                status,
                start_time.elapsed()
            ),
            other => error!(
                "Attempt {}: exception while sending error report: {}, elapsed: {:?}",
                attempt,
                other,
                start_time.elapsed()
            ),
        }

        if attempt >= max_attempts {
            error!(
                "Giving up on error report after {} attempts: {}",
                attempt, e
            );
            return DeliveryOutcome::Exhausted {
                attempts: attempt,
                last_error: e,
            };
        }

        debug!("Retrying error report in {:?}", policy.delay);
        tokio::time::sleep(policy.delay).await;
        attempt += 1;
    }
}

/// Send a single HTTP request, returning the response body on 2XX
async fn send_request(
    client: &Client,
    endpoint: &str,
    body: Vec<u8>,
) -> Result<String, WebhookForwardError> {
    let response = client
        .post(endpoint)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let response_body = response.text().await.unwrap_or_default();

    if status.is_success() {
        Ok(response_body)
    } else {
        Err(WebhookForwardError::server_error(status.as_u16(), response_body))
    }
}
