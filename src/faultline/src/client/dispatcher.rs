use crate::client::exporters::webhook_forward::{WebhookForward, WebhookPayload};
use crate::config::Config;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, warn};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    #[error("delivery queue is full, report dropped")]
    QueueFull,
    #[error("delivery queue is closed")]
    Closed,
}

/// Hands a payload off for background delivery without waiting on it.
#[cfg_attr(test, mockall::automock)]
pub trait ReportDispatch: Send + Sync {
    fn dispatch(&self, payload: WebhookPayload) -> Result<(), DispatchError>;
}

/// Bounded queue drained by a fixed number of concurrent delivery tasks.
pub struct DeliveryQueue {
    sender: mpsc::Sender<WebhookPayload>,
    tracker: TaskTracker,
    cancellation_token: CancellationToken,
}

impl DeliveryQueue {
    pub fn start(forward: WebhookForward, capacity: usize, workers: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let tracker = TaskTracker::new();
        let cancellation_token = CancellationToken::new();

        tracker.spawn(Self::run(
            forward,
            receiver,
            workers.max(1),
            tracker.clone(),
            cancellation_token.clone(),
        ));

        Self {
            sender,
            tracker,
            cancellation_token,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let forward = WebhookForward::from_config(config)?;
        Ok(Self::start(
            forward,
            usize::try_from(config.delivery_queue_capacity).unwrap_or(usize::MAX),
            usize::try_from(config.delivery_workers).unwrap_or(usize::MAX),
        ))
    }

    async fn run(
        forward: WebhookForward,
        mut receiver: mpsc::Receiver<WebhookPayload>,
        workers: usize,
        tracker: TaskTracker,
        cancellation_token: CancellationToken,
    ) {
        let permits = Arc::new(Semaphore::new(workers));
        let mut closing = false;

        loop {
            let payload = tokio::select! {
                _ = cancellation_token.cancelled(), if !closing => {
                    // stop accepting, but drain what is already queued
                    receiver.close();
                    closing = true;
                    continue;
                }
                next = receiver.recv() => match next {
                    Some(payload) => payload,
                    None => break,
                },
            };

            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };

            let forward = forward.clone();
            tracker.spawn(async move {
                let _permit = permit;
                // a panic inside delivery must not take the queue down with it
                let delivery = tokio::spawn(async move { forward.deliver(&payload).await });
                if let Err(e) = delivery.await {
                    error!("Webhook delivery task failed: {}", e);
                }
            });
        }

        debug!("Delivery queue drained");
    }

    /// Stops intake and waits up to `grace` for queued and in-flight deliveries.
    pub async fn shutdown(&self, grace: Duration) {
        self.cancellation_token.cancel();
        self.tracker.close();

        if tokio::time::timeout(grace, self.tracker.wait()).await.is_err() {
            warn!(
                "Abandoning {} in-flight webhook deliveries after {:?}",
                self.tracker.len(),
                grace
            );
        }
    }
}

impl ReportDispatch for DeliveryQueue {
    fn dispatch(&self, payload: WebhookPayload) -> Result<(), DispatchError> {
        self.sender.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::Closed,
        })
    }
}
