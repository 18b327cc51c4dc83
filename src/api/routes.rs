//! API route configuration.

use std::path::PathBuf;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::mcp::create_mcp_service;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Create the router: `/health` plus the MCP endpoint at `/mcp`.
pub fn create_router<D: Database + 'static>(
    db: D,
    categories: Option<PathBuf>,
    ct: CancellationToken,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest_service("/mcp", create_mcp_service(db, categories, ct))
        .layer(TraceLayer::new_for_http())
}
