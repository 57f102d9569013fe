//! Webhook endpoint handler.
//!
//! Order matters here: the signature is checked against the raw body bytes
//! before any JSON parsing, and no application action happens on mismatch.

use crate::api::WebhookState;
use crate::error::GatewayError;
use crate::webhook::{event::WebhookEvent, signature};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

pub async fn handle_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // A missing or unreadable header takes the same path as a wrong digest.
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !signature::verify(state.secret.as_bytes(), &body, provided) {
        warn!("Rejected webhook: signature mismatch");
        return GatewayError::SignatureMismatch.into_response();
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Signed webhook body is not a valid event: {}", e);
            return GatewayError::InvalidInput("malformed event payload".to_string())
                .into_response();
        }
    };

    // Respond quickly either way; Paystack redelivers on timeout or non-2xx.
    state.dispatcher.dispatch(&event).await;

    (StatusCode::OK, "Webhook received").into_response()
}
