use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// App-wide error type. Every fallible function returns `Result<T, AppError>`.
///
/// Each call site produces a closed error kind so the top-level handler can
/// map kind -> status code deterministically instead of forwarding
/// provider-specific internals to clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{provider} request failed: {message}")]
    UpstreamUnavailable {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse {
        provider: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AppError {
    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::UpstreamUnavailable { .. } => "upstream_unavailable",
            AppError::MalformedResponse { .. } => "malformed_response",
            AppError::Io(_) => "io",
            AppError::Serde(_) => "serde",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Upstream failures keep the legacy plain-text body shape the dashboard
/// already understands: `Error communicating with APIs: <message>`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(kind = self.kind(), %status, "request failed: {self}");
        let body = match &self {
            AppError::InvalidInput(msg) => msg.clone(),
            other => format!("Error communicating with APIs: {other}"),
        };
        (status, body).into_response()
    }
}
