use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Rejected relay configuration.
#[derive(Error, Debug)]
pub enum RelaySettingsError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUpstream(#[from] url::ParseError),

    #[error("Upstream {0} must not carry a query or fragment")]
    UpstreamHasQuery(String),
}

/// Errors the development proxy relay answers with instead of an upstream
/// response.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Path {0} is not under the proxy prefix")]
    OutsidePrefix(String),

    #[error("Method {0} is not relayed")]
    MethodNotAllowed(Method),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            RelayError::Upstream(e) => {
                let code = if e.is_timeout() {
                    "TIMEOUT"
                } else if e.is_connect() {
                    "UPSTREAM_UNREACHABLE"
                } else {
                    "UPSTREAM_FAILED"
                };
                (StatusCode::BAD_GATEWAY, code)
            }
            RelayError::OutsidePrefix(_) => (StatusCode::NOT_FOUND, "NOT_PROXIED"),
            RelayError::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "message": self.to_string(),
                "code": error_code,
            }
        }));

        (status, body).into_response()
    }
}
