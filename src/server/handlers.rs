//! HTTP API handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::constants::{SERVICE_NAME, SERVICE_VERSION};
use crate::control::{MuteController, OperationSummary};
use crate::server::server::AppState;

/// Routes advertised by the index endpoint: path, method, description
pub const ENDPOINTS: [(&str, &str, &str); 6] = [
    ("/", "GET", "API information"),
    ("/kill", "GET", "Kill the server"),
    ("/status", "GET", "Get current Discord audio status"),
    ("/toggle", "POST", "Toggle mute state for Discord streams"),
    ("/mute", "POST", "Mute all Discord streams"),
    ("/unmute", "POST", "Unmute all Discord streams"),
];

/// Error body for unexpected failures
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Service description
#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    pub endpoints: BTreeMap<&'static str, String>,
}

/// Generic acknowledgement
#[derive(Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
}

/// Run a controller call on the blocking pool; it shells out and waits
async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, tokio::task::JoinError>
where
    F: FnOnce(&MuteController) -> T + Send + 'static,
    T: Send + 'static,
{
    let controller = state.controller.clone();
    tokio::task::spawn_blocking(move || f(&controller)).await
}

fn internal_error(context: &str, e: tokio::task::JoinError) -> Response {
    tracing::error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("{}: {}", context, e))),
    )
        .into_response()
}

fn summary_response(summary: OperationSummary) -> Response {
    let status = if summary.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(summary)).into_response()
}

/// API information
pub async fn index(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    let endpoints = ENDPOINTS
        .iter()
        .filter(|(path, _, _)| *path != "/")
        .map(|(path, method, description)| (*path, format!("{} - {}", method, description)))
        .collect();

    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        started_at: state.started_at,
        endpoints,
    })
}

/// Shut the server down after in-flight requests finish
pub async fn kill(State(state): State<Arc<AppState>>) -> Json<Ack> {
    tracing::info!("Killing Discord Audio Controller Web Server...");
    state.shutdown.trigger();
    Json(Ack {
        success: true,
        message: "Server is shutting down.",
    })
}

/// Get current status of Discord audio streams
pub async fn get_status(State(state): State<Arc<AppState>>) -> Response {
    match run_blocking(&state, |c| c.get_status()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => internal_error("Error getting status", e),
    }
}

/// Toggle mute state for Discord streams
pub async fn toggle_mute(State(state): State<Arc<AppState>>) -> Response {
    match run_blocking(&state, |c| c.toggle_mute()).await {
        Ok(summary) => summary_response(summary),
        Err(e) => internal_error("Error toggling mute", e),
    }
}

/// Mute all Discord streams
pub async fn mute(State(state): State<Arc<AppState>>) -> Response {
    match run_blocking(&state, |c| c.set_mute(true)).await {
        Ok(summary) => summary_response(summary),
        Err(e) => internal_error("Error muting Discord", e),
    }
}

/// Unmute all Discord streams
pub async fn unmute(State(state): State<Arc<AppState>>) -> Response {
    match run_blocking(&state, |c| c.set_mute(false)).await {
        Ok(summary) => summary_response(summary),
        Err(e) => internal_error("Error unmuting Discord", e),
    }
}
