//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable host/port
//! and graceful shutdown on Ctrl-C.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::{self, AppState};

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance with the given configuration
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(Arc::new(config))?;
        Ok(Self::with_state(state))
    }

    /// Create a server around prepared state
    pub fn with_state(state: AppState) -> Self {
        let config = state.config.clone();
        let router = routes::build_router(state);
        Self { config, router }
    }

    /// Get the socket address the server will bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = self.config.socket_addr();
        addr.parse()
            .map_err(|source| ServerError::Address { addr, source })
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server until Ctrl-C
    ///
    /// This is the main entry point for starting the server.
    /// It binds to the configured host/port and serves requests.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.run_with_listener(listener, shutdown_signal()).await
    }

    /// Run the server on an already bound listener until `shutdown` completes
    ///
    /// This is useful for testing where you want to use a listener bound to port 0
    /// to get a random available port.
    pub async fn run_with_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Create a test server and return the bound address
    ///
    /// This binds to port 0 to get a random available port, starts the server
    /// in a background task, and returns the actual bound address.
    #[cfg(test)]
    pub async fn spawn_test_server(state: AppState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = Self::with_state(state);
        let handle = tokio::spawn(async move {
            server
                .run_with_listener(listener, std::future::pending())
                .await
                .ok();
        });

        (addr, handle)
    }
}

/// Resolves when Ctrl-C is received.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            // Never resolve, so the server keeps running
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::offline_state;
    use reqwest::StatusCode;

    #[test]
    fn test_server_socket_addr() {
        let mut config = ServerConfig::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        config.market_data.enabled = false;

        let server = Server::new(config).unwrap();
        assert_eq!(server.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_host_is_error() {
        let mut config = ServerConfig::default();
        config.host = "not a host".to_string();
        config.market_data.enabled = false;

        let server = Server::new(config).unwrap();
        assert!(matches!(
            server.socket_addr(),
            Err(ServerError::Address { .. })
        ));
    }

    #[test]
    fn test_server_config_access() {
        let mut config = ServerConfig::default();
        config.port = 9999;
        config.market_data.enabled = false;

        let server = Server::new(config).unwrap();
        assert_eq!(server.config().port, 9999);
    }

    #[tokio::test]
    async fn test_server_health_endpoint() {
        let (addr, handle) = Server::spawn_test_server(offline_state()).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "healthy");

        handle.abort();
    }

    #[tokio::test]
    async fn test_server_export_csv() {
        let (addr, handle) = Server::spawn_test_server(offline_state()).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!(
                "http://{}/export_csv?valuation_date=2026-02-16&expiry_date=2026-03-16&spot=5000&strike=5000&vol_pct=20&risk_free_pct=4",
                addr
            ))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/csv"));
        let body = response.text().await.unwrap();
        assert!(body.contains("offset,strike,call_price,put_price"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_server_form_post() {
        let (addr, handle) = Server::spawn_test_server(offline_state()).await;

        let client = reqwest::Client::new();
        let response = client
            .post(format!("http://{}/", addr))
            .header("content-type", "application/x-www-form-urlencoded")
            .body("valuation_date=2026-02-16&expiry_date=2026-03-16&spot=5000&strike=5000&vol_pct=20&risk_free_pct=4")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = response.text().await.unwrap();
        assert!(html.contains("Strike scenarios"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_graceful_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = Server::with_state(offline_state());
        let handle = tokio::spawn(server.run_with_listener(listener, async {
            rx.await.ok();
        }));

        tx.send(()).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_multiple_servers_on_different_ports() {
        let (addr1, handle1) = Server::spawn_test_server(offline_state()).await;
        let (addr2, handle2) = Server::spawn_test_server(offline_state()).await;

        assert_ne!(addr1.port(), addr2.port());

        let client = reqwest::Client::new();
        for addr in [addr1, addr2] {
            let response = client
                .get(format!("http://{}/ready", addr))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        handle1.abort();
        handle2.abort();
    }
}
