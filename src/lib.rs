//! Paystack integration backend for the Wear Space app.
//!
//! Two stateless services share this library:
//! - the transaction gateway (`paystack-gateway`), which initializes and
//!   verifies payments against the Paystack API, and
//! - the webhook receiver (`paystack-webhook`), which authenticates inbound
//!   event notifications with an HMAC-SHA512 signature and dispatches them.

pub mod api;
pub mod config;
pub mod error;
pub mod payments;
pub mod webhook;
