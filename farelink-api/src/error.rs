use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use farelink_core::ProxyError;

/// Boundary wrapper that maps the proxy error taxonomy onto HTTP.
#[derive(Debug)]
pub struct ApiError(pub ProxyError);

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self.0 {
            ProxyError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ProxyError::AuthConfig(msg) => {
                // Operator problem, not a caller problem. Log the detail,
                // never echo configuration back to the client.
                tracing::error!("upstream credentials misconfigured: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Upstream credentials are not configured".to_string(),
                    None,
                )
            }
            ProxyError::UpstreamAuth { status, body } => (
                StatusCode::BAD_GATEWAY,
                "Upstream authentication failed".to_string(),
                Some(json!({ "status": status, "body": body })),
            ),
            ProxyError::UpstreamSearch { status, body } => (
                // Pass the upstream's own status through when it is a
                // usable HTTP code.
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Upstream search failed".to_string(),
                Some(json!({ "status": status, "body": body })),
            ),
            ProxyError::Transport(msg) => {
                tracing::error!("upstream request failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream request failed".to_string(),
                    None,
                )
            }
        };

        let body = match detail {
            Some(detail) => json!({ "error": message, "detail": detail }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
