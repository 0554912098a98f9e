//! HTTP route handlers for the analysis server.

pub mod analyze;
pub mod reports;

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::StatusResponse;
use crate::state::ServerState;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Reports whether a model is loaded and how reports are handled.
pub async fn status(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        model_loaded: state.analyzer.has_model(),
        model_path: state.config.model_path.display().to_string(),
        record_reports: state.config.record_reports,
    })
}
