//! Webhook event authentication and dispatch.
//!
//! Inbound notifications are untrusted until the HMAC-SHA512 signature over
//! the exact raw body bytes checks out; only then is the payload parsed and
//! routed by event type.

pub mod dispatch;
pub mod event;
pub mod signature;
