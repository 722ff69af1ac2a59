//! Webhook forwarding for captured error reports
//!
//! Reports are wrapped in a small JSON envelope and POSTed to the configured
//! webhook. Delivery is best-effort: a bounded number of attempts with a fixed
//! delay between them, every attempt logged, and the final outcome returned
//! as a value rather than an error.
//!
//! # Example
//!
//! ```rust,no_run
//! # use faultline::client::exporters::webhook_forward::{ReportEnvelope, RetryPolicy, WebhookForward};
//! # use faultline::report::ErrorRecord;
//! # use std::time::Duration;
//! #
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let forward = WebhookForward::try_new(
//!     "https://hooks.example.com/abc",
//!     RetryPolicy::default(),
//!     Duration::from_secs(10),
//! )?;
//! let payload = ReportEnvelope::default().wrap_record(ErrorRecord::new("Timeout", "upstream timed out", 504));
//! let outcome = forward.deliver(&payload).await;
//! println!("delivered: {}", outcome.is_delivered());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod payload;
mod retry;

pub use client::WebhookForward;
pub use error::{DeliveryOutcome, WebhookForwardError};
pub use payload::{ReportEnvelope, WebhookMessage, WebhookPayload};
pub use retry::RetryPolicy;
