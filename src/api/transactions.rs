//! Transaction gateway handlers: initialize and verify.

use crate::api::GatewayState;
use crate::error::{AppResult, GatewayError};
use crate::payments::types::{self, TransactionStatus};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct InitializeRequest {
    pub email: String,
    /// Amount in major currency units (naira, not kobo).
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub success: bool,
    pub authorization_url: String,
    pub reference: String,
}

pub async fn initialize_transaction(
    State(state): State<GatewayState>,
    Json(request): Json<InitializeRequest>,
) -> AppResult<Json<InitializeResponse>> {
    if request.email.trim().is_empty() {
        return Err(GatewayError::InvalidInput(
            "email must not be empty".to_string(),
        ));
    }

    // Format validation of the address is the gateway's job, not ours.
    let amount_minor = types::to_minor_units(request.amount)?;

    let initialized = state
        .provider
        .initialize_transaction(&request.email, amount_minor)
        .await?;

    Ok(Json(InitializeResponse {
        success: true,
        authorization_url: initialized.authorization_url,
        reference: initialized.reference,
    }))
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Amount converted back to major currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn verify_transaction(
    State(state): State<GatewayState>,
    Path(reference): Path<String>,
) -> AppResult<Json<VerifyResponse>> {
    if reference.trim().is_empty() {
        return Err(GatewayError::InvalidInput(
            "reference must not be empty".to_string(),
        ));
    }

    info!("Verifying transaction: {}", reference);

    let verified = state.provider.verify_transaction(&reference).await?;

    let response = if verified.status == TransactionStatus::Success {
        VerifyResponse {
            success: true,
            status: verified.status.as_str().to_string(),
            reference: Some(verified.reference),
            amount: Some(types::to_major_units(verified.amount_minor)),
            customer: Some(verified.customer_email),
            error: None,
        }
    } else {
        VerifyResponse {
            success: false,
            status: verified.status.as_str().to_string(),
            reference: Some(verified.reference),
            amount: None,
            customer: None,
            error: Some(
                verified
                    .message
                    .unwrap_or_else(|| "Verification failed".to_string()),
            ),
        }
    };

    Ok(Json(response))
}
