use thiserror::Error;

/// Errors that can occur during a single webhook attempt
#[derive(Debug, Error)]
pub enum WebhookForwardError {
    /// Failed to serialize the payload to JSON
    #[error("Failed to serialize error report: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network request failed
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Webhook returned a non-2XX status code
    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },
}

impl WebhookForwardError {
    pub fn server_error(status: u16, body: String) -> Self {
        WebhookForwardError::Server { status, body }
    }
}

/// What happened to one delivery once attempts stopped.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered {
        attempts: u64,
    },
    /// Every attempt failed; the report is dropped after logging.
    Exhausted {
        attempts: u64,
        last_error: WebhookForwardError,
    },
}

impl DeliveryOutcome {
    pub fn attempts(&self) -> u64 {
        match self {
            DeliveryOutcome::Delivered { attempts } => *attempts,
            DeliveryOutcome::Exhausted { attempts, .. } => *attempts,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}
