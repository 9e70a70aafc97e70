//! Control-plane server lifecycle.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::handler::router;
use crate::application::state::RuntimeStatus;
use crate::error::{Error, Result};
use crate::infrastructure::config::server::ServerConfig;

struct Running {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// HTTP listener serving the liveness route on a background task.
///
/// With an empty `addr` the server is disabled: `start` and `stop` do nothing.
pub struct ControlPlaneServer {
    config: ServerConfig,
    status: Arc<RuntimeStatus>,
    running: Option<Running>,
}

impl ControlPlaneServer {
    pub fn new(config: ServerConfig, status: Arc<RuntimeStatus>) -> Self {
        Self {
            config,
            status,
            running: None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Address actually bound, useful when configured with port `0`.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.addr)
    }

    /// Bind the listener and start serving.
    ///
    /// Waits up to `startup_grace_ms` for the serve loop to fail before
    /// reporting success; after that the server keeps running in the
    /// background until [`stop`](Self::stop).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControlPlane`] if the address cannot be bound or the
    /// server fails within the startup window.
    pub async fn start(&mut self) -> Result<()> {
        if !self.config.is_enabled() {
            debug!("Control-plane server disabled");
            return Ok(());
        }
        if self.running.is_some() {
            return Ok(());
        }

        let addr = self.config.addr.trim().to_string();
        let fail = |source: io::Error| Error::ControlPlane {
            addr: addr.clone(),
            source,
        };

        let listener = TcpListener::bind(addr.as_str()).await.map_err(fail)?;
        let local = listener.local_addr().map_err(fail)?;

        let app = router(
            Arc::clone(&self.status),
            self.config.debug,
            self.config.request_timeout(),
        );
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (failed_tx, failed_rx) = oneshot::channel::<io::Error>();

        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    // A dropped sender also means shut down.
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                error!(error = %e, "Control-plane server failed");
                let _ = failed_tx.send(e);
            }
        });

        match tokio::time::timeout(self.config.startup_grace(), failed_rx).await {
            Err(_elapsed) => {}
            Ok(Ok(e)) => {
                let _ = handle.await;
                return Err(fail(e));
            }
            Ok(Err(_closed)) => {
                let _ = handle.await;
                return Err(fail(io::Error::other("server exited during startup")));
            }
        }

        info!(addr = %local, "Control-plane server listening");
        self.running = Some(Running {
            addr: local,
            shutdown: shutdown_tx,
            handle,
        });
        Ok(())
    }

    /// Stop accepting connections, let in-flight requests finish, and wait
    /// for the serving task to exit.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        let _ = running.shutdown.send(());
        if let Err(e) = running.handle.await {
            warn!(error = %e, "Control-plane server task ended abnormally");
        }
        info!(addr = %running.addr, "Control-plane server stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn config(addr: &str) -> ServerConfig {
        ServerConfig {
            addr: addr.to_string(),
            debug: false,
            startup_grace_ms: 50,
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn disabled_server_never_starts() {
        let mut server = ControlPlaneServer::new(config(""), Arc::new(RuntimeStatus::new()));

        server.start().await.unwrap();
        assert!(!server.is_running());
        assert!(server.local_addr().is_none());
        server.stop().await;
    }

    #[tokio::test]
    async fn binds_ephemeral_port_and_stops() {
        let mut server =
            ControlPlaneServer::new(config("127.0.0.1:0"), Arc::new(RuntimeStatus::new()));

        server.start().await.unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);

        server.stop().await;
        assert!(!server.is_running());
        // The port is free again once the drain completes.
        TcpListener::bind(addr).await.unwrap();
    }

    #[tokio::test]
    async fn address_in_use_fails_fast() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        let mut server = ControlPlaneServer::new(config(&addr), Arc::new(RuntimeStatus::new()));

        let started = Instant::now();
        let err = server.start().await.unwrap_err();

        assert!(started.elapsed() < Duration::from_millis(1500));
        assert!(matches!(err, Error::ControlPlane { .. }));
        assert!(!server.is_running());
    }
}
