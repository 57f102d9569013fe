//! Payment gateway trait definition.

use crate::error::AppResult;
use crate::payments::types::{InitializedTransaction, VerifiedTransaction};
use async_trait::async_trait;

/// Interface to the external payment gateway.
///
/// Exactly one outbound HTTPS call per operation; no retries are performed
/// here, retry policy belongs to the caller.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize a transaction for `email` over `amount_minor` minor
    /// currency units, returning the checkout URL and the gateway-issued
    /// reference.
    async fn initialize_transaction(
        &self,
        email: &str,
        amount_minor: u64,
    ) -> AppResult<InitializedTransaction>;

    /// Look up the current state of a previously initialized transaction.
    /// Safe to call repeatedly for the same reference.
    async fn verify_transaction(&self, reference: &str) -> AppResult<VerifiedTransaction>;
}
