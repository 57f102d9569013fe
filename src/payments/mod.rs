//! Payment gateway integration.
//!
//! A provider-agnostic trait plus the Paystack implementation used in
//! production. Handlers depend on the trait so tests can substitute a mock.

pub mod providers;
pub mod traits;
pub mod types;
