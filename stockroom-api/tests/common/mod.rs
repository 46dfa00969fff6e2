//! Shared test utilities for stockroom-api integration tests.

use reqwest::{Client, Response as ReqwestResponse};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use stockroom_api::rest::{AppState, create_app};
use stockroom_api::{ApiAuditLogger, SqliteStore};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server wrapper: full app on an ephemeral port, backed by a SQLite
/// file in a temporary directory.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<SqliteStore>,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    _dir: TempDir,
}

impl TestServer {
    /// Spawn a test server with an empty database.
    pub async fn spawn() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let public_dir = dir.path().join("public");
        std::fs::create_dir(&public_dir).expect("Failed to create public dir");
        std::fs::write(
            public_dir.join("index.html"),
            "<html><body>Stockroom</body></html>",
        )
        .expect("Failed to write index.html");

        let store = Arc::new(
            SqliteStore::open(&dir.path().join("products.db"))
                .await
                .expect("Failed to open store"),
        );

        let app_state = Arc::new(AppState {
            store: store.clone(),
            audit: Arc::new(ApiAuditLogger::new_noop()),
        });

        let router = create_app(app_state, &public_dir);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        Self {
            addr,
            client: Client::new(),
            store,
            shutdown_tx,
            _dir: dir,
        }
    }

    /// Base URL of the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str) -> ReqwestResponse {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a POST request with JSON body.
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> ReqwestResponse {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a PUT request with JSON body.
    pub async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> ReqwestResponse {
        self.client
            .put(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a DELETE request.
    pub async fn delete(&self, path: &str) -> ReqwestResponse {
        self.client
            .delete(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Shutdown the server and close the database.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        self.store.close().await;
    }
}
