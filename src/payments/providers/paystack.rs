//! Paystack payment gateway client.
//!
//! Thin wrapper over Paystack's transaction endpoints. Amounts cross this
//! boundary in minor units (kobo); conversion happens at the API layer.

use crate::config::PaystackConfig;
use crate::error::{AppResult, GatewayError};
use crate::payments::traits::PaymentGateway;
use crate::payments::types::{InitializedTransaction, TransactionStatus, VerifiedTransaction};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info, warn};

pub struct PaystackClient {
    config: PaystackConfig,
    client: Client,
}

impl PaystackClient {
    pub fn new(config: PaystackConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Make one authenticated request to the Paystack API and unwrap the
    /// response envelope. No retries; the caller sees exactly one attempt.
    async fn request<T>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.config.secret_key))
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("Paystack request to {} failed: {}", endpoint, e);
            GatewayError::UpstreamUnavailable(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read Paystack response body: {}", e);
            GatewayError::UpstreamUnavailable(e.to_string())
        })?;

        let envelope: PaystackEnvelope<T> = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse Paystack response (HTTP {}): {}", status, e);
            GatewayError::UpstreamMalformedResponse(format!("HTTP {}: {}", status, e))
        })?;

        if !envelope.status {
            warn!("Paystack declined request to {}: {}", endpoint, envelope.message);
            return Err(GatewayError::GatewayDeclined(envelope.message));
        }

        envelope.data.ok_or_else(|| {
            GatewayError::UpstreamMalformedResponse("missing data field".to_string())
        })
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn initialize_transaction(
        &self,
        email: &str,
        amount_minor: u64,
    ) -> AppResult<InitializedTransaction> {
        info!("Initializing Paystack transaction for amount {}", amount_minor);

        let payload = serde_json::json!({
            "email": email,
            "amount": amount_minor,
        });

        let response: PaystackInitializeData = self
            .request(reqwest::Method::POST, "/transaction/initialize", Some(&payload))
            .await?;

        info!(
            "Paystack transaction initialized: reference={}",
            response.reference
        );

        Ok(InitializedTransaction {
            authorization_url: response.authorization_url,
            access_code: Some(response.access_code),
            reference: response.reference,
        })
    }

    async fn verify_transaction(&self, reference: &str) -> AppResult<VerifiedTransaction> {
        info!("Verifying Paystack transaction: reference={}", reference);

        let response: PaystackVerifyData = self
            .request(
                reqwest::Method::GET,
                &format!("/transaction/verify/{}", reference),
                None,
            )
            .await?;

        info!(
            "Paystack transaction verified: reference={}, status={}",
            reference, response.status
        );

        Ok(VerifiedTransaction {
            status: TransactionStatus::from_gateway(&response.status),
            message: response.gateway_response,
            reference: response.reference,
            amount_minor: response.amount,
            customer_email: response.customer.email,
        })
    }
}

// Paystack API response envelope
#[derive(Debug, Deserialize)]
struct PaystackEnvelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PaystackInitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

#[derive(Debug, Deserialize)]
struct PaystackVerifyData {
    status: String,
    reference: String,
    amount: u64,
    customer: PaystackCustomer,
    #[serde(default)]
    gateway_response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaystackCustomer {
    email: String,
}
