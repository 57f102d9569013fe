//! HTTP surface for both services.

pub mod health;
pub mod transactions;
pub mod webhook;

use crate::payments::traits::PaymentGateway;
use crate::webhook::dispatch::Dispatcher;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State for the transaction gateway service. Built once at startup and
/// injected into handlers; no ambient lookups.
#[derive(Clone)]
pub struct GatewayState {
    pub provider: Arc<dyn PaymentGateway>,
}

/// State for the webhook receiver service.
#[derive(Clone)]
pub struct WebhookState {
    /// Shared signing secret, same value configured on the Paystack
    /// dashboard.
    pub secret: String,
    pub dispatcher: Arc<Dispatcher>,
}

pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route(
            "/initialize-transaction",
            post(transactions::initialize_transaction),
        )
        .route(
            "/verify-transaction/:reference",
            get(transactions::verify_transaction),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", post(webhook::handle_webhook))
        .route("/healthz", get(health::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
