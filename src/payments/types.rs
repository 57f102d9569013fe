//! Gateway request/response types and currency-unit conversion.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};

/// Result of initializing a transaction with the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializedTransaction {
    /// Hosted checkout URL the customer is redirected to.
    pub authorization_url: String,
    /// Access code for inline payment forms, when the gateway returns one.
    pub access_code: Option<String>,
    /// Opaque reference issued by the gateway; correlation key for verify
    /// and for webhook events.
    pub reference: String,
}

/// Normalized result of verifying a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedTransaction {
    pub status: TransactionStatus,
    /// Gateway-supplied explanation for non-success statuses.
    pub message: Option<String>,
    pub reference: String,
    /// Amount in the gateway's minor currency units (kobo for NGN).
    pub amount_minor: u64,
    pub customer_email: String,
}

/// Transaction status as reported by the gateway's verify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
}

impl TransactionStatus {
    /// Map the gateway's free-form status string. Only `success` grants
    /// success; unknown values are treated as failures.
    pub fn from_gateway(status: &str) -> Self {
        match status {
            "success" => TransactionStatus::Success,
            "pending" | "ongoing" | "processing" | "queued" => TransactionStatus::Pending,
            _ => TransactionStatus::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Pending => "pending",
        }
    }
}

/// Convert a major-unit amount (e.g. naira) to the gateway's minor units
/// (kobo). Rounds to the nearest integer, halves away from zero; the
/// currency has exactly two decimal places.
pub fn to_minor_units(amount_major: f64) -> Result<u64, GatewayError> {
    if !amount_major.is_finite() || amount_major <= 0.0 {
        return Err(GatewayError::InvalidInput(
            "amount must be a positive number".to_string(),
        ));
    }

    Ok((amount_major * 100.0).round() as u64)
}

/// Convert a minor-unit amount back to major units for API responses.
pub fn to_major_units(amount_minor: u64) -> f64 {
    amount_minor as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amount_to_minor_units() {
        assert_eq!(to_minor_units(500.0).unwrap(), 50000);
    }

    #[test]
    fn test_fractional_amount_to_minor_units() {
        assert_eq!(to_minor_units(19.99).unwrap(), 1999);
        assert_eq!(to_minor_units(0.01).unwrap(), 1);
    }

    #[test]
    fn test_half_kobo_rounds_away_from_zero() {
        // 10.125 and 1012.5 are exactly representable in binary.
        assert_eq!(to_minor_units(10.125).unwrap(), 1013);
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        assert!(to_minor_units(0.0).is_err());
        assert!(to_minor_units(-5.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite_amounts() {
        assert!(to_minor_units(f64::NAN).is_err());
        assert!(to_minor_units(f64::INFINITY).is_err());
    }

    #[test]
    fn test_minor_units_round_trip() {
        assert_eq!(to_major_units(50000), 500.0);
        assert_eq!(to_major_units(1999), 19.99);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TransactionStatus::from_gateway("success"),
            TransactionStatus::Success
        );
        assert_eq!(
            TransactionStatus::from_gateway("ongoing"),
            TransactionStatus::Pending
        );
        assert_eq!(
            TransactionStatus::from_gateway("abandoned"),
            TransactionStatus::Failed
        );
    }
}
