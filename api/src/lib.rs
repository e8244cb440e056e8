use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    middleware_layer::{cors::cors_headers, request_context::request_context},
    routes::{
        complete::complete_route::complete_route,
        health_route::health_route,
        method_fallback::{method_not_allowed, not_found, preflight},
        retrieve::retrieve_route::retrieve_route,
    },
};

const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(address = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Build the HTTP router.
///
/// - `POST /api/complete` — completion relay
/// - `POST /api/retrieve` — mock retrieval / rerank
/// - `GET /health`
///
/// Both API routes answer OPTIONS with 200 and any other method with 405.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/complete",
            post(complete_route)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/retrieve",
            post(retrieve_route)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_route))
        .fallback(not_found)
        .layer(middleware::from_fn(cors_headers))
        .layer(middleware::from_fn(request_context))
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server simply runs until killed.
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{
        Json,
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        response::{IntoResponse, Response},
        routing::post,
    };
    use llm_relay::LlmModelConfig;
    use mock_retrieval::RetrievalConfig;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;

    const TOKEN: &str = "test-token";

    async fn serve(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    /// Stand-in for the chat-completion provider, steered by the prompt text.
    async fn fake_upstream(headers: HeaderMap, Json(body): Json<Value>) -> Response {
        let bearer = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
        if bearer != Some("Bearer test-token") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad token" })))
                .into_response();
        }
        assert_eq!(body["messages"][0]["role"], "user");

        match body["messages"][0]["content"].as_str().unwrap_or_default() {
            "rate me" => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": { "message": "slow down" } })),
            )
                .into_response(),
            "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
            "no choices" => Json(json!({ "choices": [] })).into_response(),
            prompt => Json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": format!("{} says: {prompt}", body["model"].as_str().unwrap_or("?"))
                    }
                }]
            }))
            .into_response(),
        }
    }

    fn llm_config(endpoint: String, api_key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            model: "test-model".into(),
            endpoint,
            api_key: api_key.map(str::to_string),
            max_tokens: None,
            timeout_secs: Some(5),
        }
    }

    /// Spin up the fake upstream plus the app pointed at it; returns the app base URL.
    async fn app_with_upstream(api_key: Option<&str>) -> String {
        let upstream = serve(Router::new().route("/v1/chat/completions", post(fake_upstream))).await;
        let cfg = llm_config(format!("http://{upstream}/v1/chat/completions"), api_key);
        let state = AppState::new(cfg, RetrievalConfig::default()).unwrap();
        let addr = serve(router(Arc::new(state))).await;
        format!("http://{addr}")
    }

    async fn post_json(url: &str, body: Value) -> (StatusCode, HeaderMap, Value) {
        let res = reqwest::Client::new()
            .post(url)
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
        let headers = res.headers().clone();
        let body = res.json::<Value>().await.unwrap_or(Value::Null);
        (status, headers, body)
    }

    fn assert_cors(headers: &HeaderMap) {
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[tokio::test]
    async fn relay_returns_first_choice() {
        let base = app_with_upstream(Some(TOKEN)).await;
        let (status, headers, body) =
            post_json(&format!("{base}/api/complete"), json!({ "prompt": "hello" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "output": "test-model says: hello" }));
        assert_cors(&headers);
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn relay_propagates_upstream_status_and_body() {
        let base = app_with_upstream(Some(TOKEN)).await;
        let (status, _, body) =
            post_json(&format!("{base}/api/complete"), json!({ "prompt": "rate me" })).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        assert_eq!(body["details"]["error"]["message"], "slow down");
    }

    #[tokio::test]
    async fn relay_propagates_upstream_auth_failure() {
        let base = app_with_upstream(Some("wrong-token")).await;
        let (status, _, body) =
            post_json(&format!("{base}/api/complete"), json!({ "prompt": "hello" })).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["details"], json!({ "error": "bad token" }));
    }

    #[tokio::test]
    async fn relay_decode_failures_are_500() {
        let base = app_with_upstream(Some(TOKEN)).await;
        for prompt in ["garbage", "no choices"] {
            let (status, _, body) =
                post_json(&format!("{base}/api/complete"), json!({ "prompt": prompt })).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{prompt}");
            assert_eq!(body["code"], "INTERNAL_ERROR");
            assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
        }
    }

    #[tokio::test]
    async fn relay_network_failure_is_500() {
        let state = AppState::new(
            llm_config("http://127.0.0.1:1/v1/chat/completions".into(), Some(TOKEN)),
            RetrievalConfig::default(),
        )
        .unwrap();
        let base = format!("http://{}", serve(router(Arc::new(state))).await);
        let (status, _, body) =
            post_json(&format!("{base}/api/complete"), json!({ "prompt": "hello" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn relay_without_credentials_is_500_but_retrieval_works() {
        let base = app_with_upstream(None).await;
        let (status, _, body) =
            post_json(&format!("{base}/api/complete"), json!({ "prompt": "hello" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("not configured"));

        let (status, _, _) =
            post_json(&format!("{base}/api/retrieve"), json!({ "query": "q" })).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_input_is_400_regardless_of_other_fields() {
        let base = app_with_upstream(Some(TOKEN)).await;
        for body in [
            json!({}),
            json!({ "prompt": "" }),
            json!({ "prompt": 1, "query": "x" }),
        ] {
            let (status, headers, v) = post_json(&format!("{base}/api/complete"), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(v["error"], "Missing prompt");
            assert_cors(&headers);
        }
        for body in [
            json!({}),
            json!({ "k": 3, "rerank": true, "rerankK": 2 }),
            json!({ "query": ["how to authenticate"] }),
        ] {
            let (status, _, v) = post_json(&format!("{base}/api/retrieve"), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(v["error"], "Missing query");
        }
    }

    #[tokio::test]
    async fn empty_and_malformed_bodies_are_400() {
        let base = app_with_upstream(Some(TOKEN)).await;
        let client = reqwest::Client::new();
        for path in ["/api/complete", "/api/retrieve"] {
            let empty = client.post(format!("{base}{path}")).send().await.unwrap();
            assert_eq!(empty.status().as_u16(), 400);
            let v: Value = empty.json().await.unwrap();
            assert_eq!(v["code"], "MISSING_INPUT");

            let broken = client
                .post(format!("{base}{path}"))
                .header("content-type", "application/json")
                .body("{\"prompt\":")
                .send()
                .await
                .unwrap();
            assert_eq!(broken.status().as_u16(), 400);
            let v: Value = broken.json().await.unwrap();
            assert_eq!(v["code"], "BAD_REQUEST");
        }
    }

    #[tokio::test]
    async fn non_post_is_405_and_options_is_200() {
        let base = app_with_upstream(Some(TOKEN)).await;
        let client = reqwest::Client::new();
        for path in ["/api/complete", "/api/retrieve"] {
            for method in [
                reqwest::Method::GET,
                reqwest::Method::PUT,
                reqwest::Method::DELETE,
                reqwest::Method::PATCH,
            ] {
                let res = client
                    .request(method.clone(), format!("{base}{path}"))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status().as_u16(), 405, "{method} {path}");
                assert_eq!(res.headers()["access-control-allow-origin"], "*");
                let v: Value = res.json().await.unwrap();
                assert_eq!(v["error"], "Use POST");
            }

            let res = client
                .request(reqwest::Method::OPTIONS, format!("{base}{path}"))
                .send()
                .await
                .unwrap();
            assert_eq!(res.status().as_u16(), 200);
            assert_eq!(res.headers()["access-control-allow-methods"], "POST, OPTIONS");
            assert!(res.bytes().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn retrieval_mode_returns_k_docs() {
        let base = app_with_upstream(None).await;
        let (status, headers, body) = post_json(
            &format!("{base}/api/retrieve"),
            json!({ "query": "vector search", "k": 4 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_cors(&headers);
        assert_eq!(body["reranked"], false);
        assert_eq!(body["metrics"]["totalDocs"], 60);
        assert!(body["metrics"]["latency"].is_u64());

        let results = body["results"].as_array().unwrap();
        let ids: Vec<u64> = results.iter().map(|d| d["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(results[0]["content"], "Doc 0 content for: vector search");
        assert_eq!(results[0]["metadata"]["source"], "info");
    }

    #[tokio::test]
    async fn rerank_mode_uses_keyword_table() {
        let base = app_with_upstream(None).await;
        let (status, _, body) = post_json(
            &format!("{base}/api/retrieve"),
            json!({ "query": "how to authenticate", "rerank": true, "rerankK": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reranked"], true);

        let results = body["results"].as_array().unwrap();
        let ids: Vec<u64> = results.iter().map(|d| d["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![0, 2, 5]);
        let scores: Vec<f64> = results.iter().map(|d| d["score"].as_f64().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn rerank_fallback_is_stable_across_calls() {
        let base = app_with_upstream(None).await;
        let url = format!("{base}/api/retrieve");
        let (_, _, a) = post_json(
            &url,
            json!({ "query": "Borrow Checker", "rerank": 1, "rerankK": "10" }),
        )
        .await;
        let (_, _, b) = post_json(
            &url,
            json!({ "query": " borrow checker ", "rerank": "yes", "rerankK": 10 }),
        )
        .await;
        let ids = |v: &Value| -> Vec<u64> {
            v["results"]
                .as_array()
                .unwrap()
                .iter()
                .map(|d| d["id"].as_u64().unwrap())
                .collect()
        };
        assert_eq!(ids(&a).len(), 7);
        assert_eq!(ids(&a), ids(&b));
    }

    #[tokio::test]
    async fn whitespace_inputs_are_not_missing() {
        let base = app_with_upstream(Some(TOKEN)).await;

        let (status, _, body) =
            post_json(&format!("{base}/api/complete"), json!({ "prompt": "   " })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "output": "test-model says:    " }));

        let url = format!("{base}/api/retrieve");
        let ids = |v: &Value| -> Vec<u64> {
            v["results"]
                .as_array()
                .unwrap()
                .iter()
                .map(|d| d["id"].as_u64().unwrap())
                .collect()
        };

        let (status, _, body) =
            post_json(&url, json!({ "query": "   ", "rerank": true, "rerankK": 10 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![0, 3, 6, 9, 12, 15, 18]);
        assert_eq!(body["results"][0]["content"], "Doc 0 content for:    ");

        let (status, _, body) = post_json(&url, json!({ "query": "   ", "rerank": true })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![0, 3, 6]);
    }

    #[tokio::test]
    async fn health_and_unknown_path() {
        let base = app_with_upstream(Some(TOKEN)).await;
        let res = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
        let v: Value = res.json().await.unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["relayConfigured"], true);
        assert_eq!(v["model"], "test-model");

        let res = reqwest::get(format!("{base}/nope")).await.unwrap();
        assert_eq!(res.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let base = app_with_upstream(None).await;
        let res = reqwest::Client::new()
            .post(format!("{base}/api/retrieve"))
            .header("X-Request-Id", "trace-42")
            .json(&json!({ "query": "q" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.headers()["x-request-id"], "trace-42");
    }
}
