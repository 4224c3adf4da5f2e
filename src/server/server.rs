//! HTTP server: router, shared state and shutdown

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use crate::config::ServerConfig;
use crate::control::MuteController;
use crate::error::{Error, Result};

/// Requests a graceful server shutdown
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Stop accepting connections and drain in-flight requests
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by all request handlers
pub struct AppState {
    pub controller: MuteController,
    pub shutdown: ShutdownHandle,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(controller: MuteController, shutdown: ShutdownHandle) -> Self {
        Self {
            controller,
            shutdown,
            started_at: Utc::now(),
        }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/kill", get(handlers::kill))
        .route("/status", get(handlers::get_status))
        .route("/toggle", post(handlers::toggle_mute))
        .route("/mute", post(handlers::mute))
        .route("/unmute", post(handlers::unmute))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The control API server
pub struct WebServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl WebServer {
    pub fn new(config: ServerConfig, controller: MuteController) -> Self {
        let state = Arc::new(AppState::new(controller, ShutdownHandle::new()));
        Self { config, state }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.state.shutdown.clone()
    }

    /// Bind the configured address and serve until shutdown
    pub async fn run(self) -> Result<()> {
        let addr = self.config.listen_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(format!("Failed to bind {}: {}", addr, e)))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        tracing::info!("Listening on http://{}", listener.local_addr()?);

        let shutdown = self.state.shutdown.clone();
        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown(shutdown: ShutdownHandle) {
    let mut rx = shutdown.subscribe();
    let requested = async move {
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = requested => tracing::info!("Shutdown requested"),
        _ = ctrl_c => shutdown.trigger(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::ScriptedTool;
    use crate::control::StreamMatcher;
    use std::time::Duration;

    fn server() -> WebServer {
        let controller = MuteController::new(Arc::new(ScriptedTool::new()), StreamMatcher::default());
        WebServer::new(ServerConfig::default(), controller)
    }

    #[test]
    fn test_shutdown_handle() {
        let handle = ShutdownHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_triggered());
        clone.trigger();
        assert!(handle.is_triggered());
    }

    #[tokio::test]
    async fn test_graceful_shutdown() {
        let server = server();
        let shutdown = server.shutdown_handle();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let task = tokio::spawn(server.serve(listener));
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shutdown_before_serve() {
        let server = server();
        server.shutdown_handle().trigger();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), server.serve(listener))
            .await
            .expect("server did not stop");
        assert!(result.is_ok());
    }
}
