//! Test utilities for vinfo-client
//!
//! [`TestServer`] serves an axum router on a local port, optionally under a
//! path prefix such as `/v2.0`, and hands out a [`VehicleApiClient`] already
//! pointed at it. The server stops when the handle is dropped.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{Result, VehicleApiClient};

const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);
const CLIENT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// A locally served router plus a client for it
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: VehicleApiClient,
    prefix: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Serve `router` at the root of an ephemeral port
    pub async fn start<S>(router: Router<S>) -> Result<Self>
    where
        Router<S>: Into<Router>,
    {
        Self::serve(router.into(), String::new()).await
    }

    /// Serve `router` under `prefix` (e.g. `/v2.0`); the client's base URL
    /// includes the prefix.
    ///
    /// ```ignore
    /// use vinfo_client::testing::TestServer;
    ///
    /// let server = TestServer::start_nested("/v2.0", fake_vehicle_api()).await?;
    /// let list = server.client.list_vehicles("token").await?;
    /// assert!(server.api_url().ends_with("/v2.0"));
    /// ```
    pub async fn start_nested<S>(prefix: &str, router: Router<S>) -> Result<Self>
    where
        Router<S>: Into<Router>,
    {
        let prefix = format!("/{}", prefix.trim_matches('/'));
        let router = Router::new().nest(&prefix, router.into());
        Self::serve(router, prefix).await
    }

    async fn serve(router: Router, prefix: String) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                tracing::warn!(error = %e, "Test server stopped with error");
            }
        });

        let client = VehicleApiClient::with_config(
            &format!("http://{}{}", addr, prefix),
            CLIENT_TIMEOUT,
            CLIENT_CONNECT_TIMEOUT,
        )?;

        Ok(Self {
            addr,
            client,
            prefix,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Root URL of the server, without the prefix
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL the client talks to: root URL plus prefix
    pub fn api_url(&self) -> String {
        format!("{}{}", self.base_url(), self.prefix)
    }

    /// Stop the server and wait for it to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
