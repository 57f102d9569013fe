//! HMAC-SHA512 signature verification for Paystack webhooks.
//!
//! The digest is computed over the request body bytes exactly as received.
//! Re-serializing the parsed JSON can reorder keys or change whitespace and
//! break verification, so parsing must never happen before this check.

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Hex-encoded HMAC-SHA512 of `payload` under `secret`. This matches the
/// signature Paystack places in the `x-paystack-signature` header.
pub fn sign(secret: &[u8], payload: &[u8]) -> String {
    let mut mac = HmacSha512::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a header-provided signature against the computed digest.
///
/// Constant-time over the signature contents: after the length check, every
/// byte is compared regardless of where the first mismatch occurs.
pub fn verify(secret: &[u8], payload: &[u8], provided: &str) -> bool {
    let computed = sign(secret, payload);
    let provided = provided.trim();

    if computed.len() != provided.len() {
        return false;
    }

    computed
        .as_bytes()
        .iter()
        .zip(provided.as_bytes().iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
