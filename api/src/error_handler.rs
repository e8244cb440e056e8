use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm_relay::RelayError;
use mock_retrieval::RetrievalError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("invalid configuration: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("Use POST")]
    MethodNotAllowed,

    /// Required request field is absent or empty; payload is the client-facing message.
    #[error("{0}")]
    MissingInput(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    // --- Upstream ---
    /// Non-2xx from the completion provider, relayed with its status and body.
    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, details: Value },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingInput(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,

            // relayed
            AppError::Upstream { status, .. } => *status,

            // 5xx
            AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::MissingInput(_) => "MISSING_INPUT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound => "NOT_FOUND",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let error = self.to_string();
        let details = match self {
            AppError::Upstream { details, .. } => Some(details),
            _ => None,
        };
        (
            status,
            Json(ErrorBody {
                error,
                code,
                details,
            }),
        )
            .into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Upstream HTTP failures keep their status and body; everything else is a 500.
impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        if let Some(http) = err.upstream_status() {
            let status =
                StatusCode::from_u16(http.status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
            let details = serde_json::from_str::<Value>(&http.body)
                .unwrap_or_else(|_| Value::String(http.body.clone()));
            warn!(%status, url = %http.url, "relaying upstream error");
            return AppError::Upstream { status, details };
        }
        error!(error = %err, "completion relay failed");
        AppError::Internal(err.to_string())
    }
}

impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::MissingQuery => AppError::MissingInput("Missing query"),
            other => AppError::Internal(other.to_string()),
        }
    }
}
