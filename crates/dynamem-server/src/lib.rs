//! Embeddable HTTP listener for DynaMem.
//!
//! [`MemoryServer`] owns a [`DocumentStore`] and serves it over the DynamoDB
//! JSON protocol on a lazily bound port:
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use dynamem_server::{MemoryServer, ServerConfig};
//!
//! let server = MemoryServer::new(ServerConfig::default());
//! let endpoint = server.endpoint().await?;
//! println!("listening on {endpoint}");
//! server.close().await;
//! # Ok(())
//! # }
//! ```

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use dynamem_core::{DocumentStore, DocumentStoreHandler};
use dynamem_http::service::{StoreHttpConfig, StoreHttpService};

pub use config::ServerConfig;

/// HTTP listener wrapping a [`DocumentStore`].
///
/// `endpoint` and `close` are both idempotent. The first bound port is
/// remembered, so a closed server comes back on the same port.
#[derive(Debug)]
pub struct MemoryServer {
    config: ServerConfig,
    store: Arc<DocumentStore>,
    state: Mutex<ListenerState>,
}

#[derive(Debug, Default)]
struct ListenerState {
    bound_port: Option<u16>,
    running: Option<RunningListener>,
}

#[derive(Debug)]
struct RunningListener {
    endpoint: String,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MemoryServer {
    /// Create a server around a fresh, empty store.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(DocumentStore::new()))
    }

    /// Create a server around an existing store.
    #[must_use]
    pub fn with_store(config: ServerConfig, store: Arc<DocumentStore>) -> Self {
        Self {
            config,
            store,
            state: Mutex::new(ListenerState::default()),
        }
    }

    /// The store served by this listener, for in-process seeding.
    #[must_use]
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    /// Start listening if not already started and return `http://host:port`.
    pub async fn endpoint(&self) -> Result<String> {
        let mut state = self.state.lock().await;
        if let Some(running) = &state.running {
            return Ok(running.endpoint.clone());
        }

        let port = state.bound_port.unwrap_or(self.config.port);
        let listener = TcpListener::bind((self.config.host.as_str(), port))
            .await
            .with_context(|| format!("failed to bind to {}:{port}", self.config.host))?;
        let addr = listener
            .local_addr()
            .context("failed to read bound address")?;

        let endpoint = format!("http://{}:{}", self.config.host, addr.port());
        let service = StoreHttpService::new(
            Arc::new(DocumentStoreHandler::new(Arc::clone(&self.store))),
            StoreHttpConfig::default(),
        );
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(serve(listener, service, shutdown_rx));

        info!(%addr, %endpoint, "listener started");
        state.bound_port = Some(addr.port());
        state.running = Some(RunningListener {
            endpoint: endpoint.clone(),
            shutdown,
            task,
        });
        Ok(endpoint)
    }

    /// Stop listening and wait for in-flight requests to drain.
    pub async fn close(&self) {
        let Some(running) = self.state.lock().await.running.take() else {
            return;
        };

        // A send error means the serve task has already exited.
        let _ = running.shutdown.send(true);
        if let Err(e) = running.task.await {
            error!(error = %e, "listener task failed");
        }
        info!(endpoint = %running.endpoint, "listener stopped");
    }

    /// Whether the listener is currently accepting connections.
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.running.is_some()
    }
}

/// Accept connections until `shutdown` fires or its sender is dropped.
async fn serve(
    listener: TcpListener,
    service: StoreHttpService<DocumentStoreHandler>,
    mut shutdown: watch::Receiver<bool>,
) {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            _ = shutdown.changed() => {
                info!("shutting down listener, draining connections");
                break;
            }
        }
    }

    drop(listener);
    graceful.shutdown().await;
}
