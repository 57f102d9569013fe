//! Paystack webhook event payloads.

use serde::Deserialize;

/// An inbound gateway event. Parsed only after signature verification.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event type, e.g. `charge.success`. The set is open; unrecognized
    /// values are accepted.
    pub event: String,
    #[serde(default)]
    pub data: EventData,
}

/// Event body. Fields beyond the reference vary by event type, so all of
/// them are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer: Option<EventCustomer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventCustomer {
    #[serde(default)]
    pub email: Option<String>,
}

/// Dispatchable event kinds. `Other` keeps the receiver forward-compatible
/// with event types Paystack adds later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ChargeSuccess,
    ChargeFailed,
    Other(String),
}

impl From<&str> for EventKind {
    fn from(event: &str) -> Self {
        match event {
            "charge.success" => EventKind::ChargeSuccess,
            "charge.failed" => EventKind::ChargeFailed,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl WebhookEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from(self.event.as_str())
    }

    /// Deduplication key for redelivered events: the gateway transaction
    /// reference qualified by the event type.
    pub fn idempotency_key(&self) -> String {
        format!("{}:{}", self.event, self.data.reference)
    }
}
