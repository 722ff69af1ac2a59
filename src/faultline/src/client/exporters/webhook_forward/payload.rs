use crate::config::Config;
use crate::constants::{EVENT_NAME, EVENT_STATUS_SUCCESS, USERNAME};
use crate::report::ErrorRecord;
use serde::{Deserialize, Serialize};

/// Body of a report: either the raw record or pre-formatted text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebhookMessage {
    Text(String),
    Record(Box<ErrorRecord>),
}

/// Wire shape POSTed to the webhook.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event_name: String,
    pub message: WebhookMessage,
    pub status: String,
    pub username: String,
}

impl WebhookPayload {
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Fixed envelope fields shared by every payload the daemon emits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEnvelope {
    pub event_name: String,
    pub username: String,
}

impl Default for ReportEnvelope {
    fn default() -> Self {
        Self {
            event_name: EVENT_NAME.to_string(),
            username: USERNAME.to_string(),
        }
    }
}

impl From<&Config> for ReportEnvelope {
    fn from(config: &Config) -> Self {
        Self {
            event_name: config.event_name.clone(),
            username: config.username.clone(),
        }
    }
}

impl ReportEnvelope {
    fn wrap(&self, message: WebhookMessage) -> WebhookPayload {
        WebhookPayload {
            event_name: self.event_name.clone(),
            message,
            status: EVENT_STATUS_SUCCESS.to_string(),
            username: self.username.clone(),
        }
    }

    pub fn wrap_record(&self, record: ErrorRecord) -> WebhookPayload {
        self.wrap(WebhookMessage::Record(Box::new(record)))
    }

    pub fn wrap_report(&self, report: impl Into<String>) -> WebhookPayload {
        self.wrap(WebhookMessage::Text(report.into()))
    }
}
