use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wearspace_payments::api::{self, WebhookState};
use wearspace_payments::config::{Config, DEFAULT_WEBHOOK_PORT};
use wearspace_payments::webhook::dispatch::{Dispatcher, LoggingSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env(DEFAULT_WEBHOOK_PORT)?;

    tracing::info!("Starting Paystack webhook receiver");

    let dispatcher = Arc::new(Dispatcher::new(Arc::new(LoggingSink)));
    let app = api::webhook_router(WebhookState {
        secret: config.paystack.secret_key.clone(),
        dispatcher,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
