use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use crate::task_processor::TaskProcessor;

const VERSION_ENDPOINT: &str = "/";
const NOTIFY_ENDPOINT: &str = "/api/notify";

/// Shared handler state; the processor is built once at startup.
pub struct ServerState {
    pub processor: Arc<TaskProcessor>,
    pub version: String,
}

pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(VERSION_ENDPOINT, get(handle_version))
        .route(NOTIFY_ENDPOINT, get(handle_notify))
        .with_state(state)
}

/// Serves the notification endpoint until interrupted.
pub async fn run_server(bind_addr: SocketAddr, state: Arc<ServerState>) -> Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind event listener on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve event listener address")?;
    tracing::info!(addr = %local_addr, "listening for notifications");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("event listener exited unexpectedly")?;
    Ok(())
}

async fn handle_version(State(state): State<Arc<ServerState>>) -> Response {
    (StatusCode::OK, Json(json!({ "version": state.version }))).into_response()
}

async fn handle_notify(State(state): State<Arc<ServerState>>) -> Response {
    match state.processor.process_tasks().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "Success" }))).into_response(),
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "processing cycle failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
