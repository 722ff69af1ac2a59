use crate::client::DeliveryQueue;
use crate::config::Config;
use crate::daemon::app::get_app;
use crate::daemon::state::DaemonState;
use crate::integration::load_manifest;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct DaemonServer {
    config: Arc<Config>,
    listener: TcpListener,
}

impl DaemonServer {
    /// Validates the config, then claims the listening socket.
    pub async fn bind(config: Config) -> Result<Self> {
        config.validate()?;

        let addr: SocketAddr = config
            .server
            .parse()
            .with_context(|| format!("Invalid server address {}", config.server))?;

        match TcpListener::bind(addr).await {
            Ok(listener) => Ok(Self {
                config: Arc::new(config),
                listener,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                anyhow::bail!(
                    "Failed to start faultline: port {} is already in use.",
                    addr.port()
                );
            }
            Err(e) => anyhow::bail!("Failed to bind to address {}: {}", addr, e),
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until the token is cancelled, then drains the delivery queue.
    pub async fn run(self, cancellation_token: CancellationToken) -> Result<()> {
        let manifest = load_manifest(&self.config)?;
        let queue = Arc::new(DeliveryQueue::from_config(&self.config)?);
        let state = DaemonState::new(Arc::clone(&self.config), queue.clone(), manifest);

        info!(
            "faultline listening on {}, reporting to {}",
            self.local_addr()?,
            self.config.webhook_url
        );

        axum::serve(self.listener, get_app(state))
            .with_graceful_shutdown(cancellation_token.cancelled_owned())
            .await
            .context("HTTP server failed")?;

        info!("HTTP server stopped, flushing pending error reports");
        queue.shutdown(self.config.shutdown_grace()).await;
        Ok(())
    }
}

/// Cancels the token on Ctrl-C or SIGTERM.
pub async fn shutdown_signal(cancellation_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
        _ = cancellation_token.cancelled() => return,
    }
    cancellation_token.cancel();
}
