//! POST /api/complete — relays a prompt to the chat-completion upstream.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use tracing::debug;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::request_context::REQUEST_ID_HEADER,
    routes::{
        complete::complete_request::{CompleteRequest, CompleteResponse},
        json_body::parse_json_body,
    },
};

/// Handler: POST /api/complete
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/api/complete \
///   -H 'content-type: application/json' \
///   -d '{"prompt":"Say hi"}'
/// ```
pub async fn complete_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<CompleteResponse>> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let req = CompleteRequest::from_value(&parse_json_body(&body)?)?;

    let relay = state.relay.as_ref().ok_or_else(|| {
        AppError::Internal("completion relay is not configured: AI_PIPE_TOKEN is not set".into())
    })?;

    debug!(
        request_id = %request_id,
        prompt_len = req.prompt.len(),
        model = relay.model(),
        "complete_route: forwarding"
    );

    let output = relay.generate(&req.prompt, None).await?;

    debug!(
        request_id = %request_id,
        output_len = output.len(),
        "complete_route: success"
    );

    Ok(Json(CompleteResponse { output }))
}
