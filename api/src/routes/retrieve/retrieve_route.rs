use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use mock_retrieval::{RetrievalRequest, RetrievalResponse, retrieve};
use tracing::debug;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    middleware_layer::request_context::REQUEST_ID_HEADER,
    routes::json_body::parse_json_body,
};

/// Handler: POST /api/retrieve
///
/// Body: `{ "query": string, "k"?: number, "rerank"?: bool, "rerankK"?: number }`.
pub async fn retrieve_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<RetrievalResponse>> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let req = RetrievalRequest::from_value(&parse_json_body(&body)?)?;

    debug!(
        request_id = %request_id,
        query = %req.query,
        k = req.k,
        rerank = req.rerank,
        rerank_k = req.rerank_k,
        "retrieve_route: start"
    );

    let resp = retrieve(&state.retrieval, &req);

    debug!(
        request_id = %request_id,
        hits = resp.results.len(),
        latency_ms = resp.metrics.latency,
        "retrieve_route: success"
    );

    Ok(Json(resp))
}
