use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{debug, info};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Reuse the caller's request id or mint one, and store it on the request headers.
fn ensure_request_id(headers: &mut HeaderMap) -> String {
    if let Some(v) = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return v.to_string();
    }

    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(v) = HeaderValue::from_str(&id) {
        headers.insert(REQUEST_ID_HEADER, v);
    }
    id
}

/// Tag each request with an id, echo it back, and log one line per request.
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let request_id = ensure_request_id(req.headers_mut());
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    debug!(request_id = %request_id, %method, %path, "request: start");

    let mut res = next.run(req).await;

    if let Ok(v) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, v);
    }

    info!(
        request_id = %request_id,
        %method,
        %path,
        status = res.status().as_u16(),
        latency_ms = started.elapsed().as_millis(),
        "request: done"
    );

    res
}
