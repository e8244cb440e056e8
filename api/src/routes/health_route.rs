use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub relay_configured: bool,
    pub model: String,
    pub total_docs: u32,
}

/// Handler: GET /health. Local liveness only; the upstream is not probed.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        relay_configured: state.relay.is_some(),
        model: state.llm_config.model.clone(),
        total_docs: state.retrieval.total_docs,
    })
}
