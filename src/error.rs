use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the gateway client and webhook receiver.
///
/// Every variant maps to a structured JSON response; upstream detail is
/// logged but never echoed back to the caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("webhook signature mismatch")]
    SignatureMismatch,

    #[error("payment gateway unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("unexpected payment gateway response: {0}")]
    UpstreamMalformedResponse(String),

    /// The gateway answered with a well-formed envelope but `status: false`.
    #[error("payment gateway declined the request: {0}")]
    GatewayDeclined(String),
}

pub type AppResult<T> = Result<T, GatewayError>;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GatewayError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // One uniform body for every rejection path so callers cannot
            // tell a malformed header apart from a wrong digest.
            GatewayError::SignatureMismatch => {
                (StatusCode::BAD_REQUEST, "Invalid signature".to_string())
            }
            GatewayError::UpstreamUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error contacting payment gateway".to_string(),
            ),
            GatewayError::UpstreamMalformedResponse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected response from payment gateway".to_string(),
            ),
            GatewayError::GatewayDeclined(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
