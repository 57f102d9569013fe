//! Liveness endpoints for deployment readiness checks.

pub async fn root() -> &'static str {
    "Paystack backend is running"
}

pub async fn healthz() -> &'static str {
    "Server is up and running"
}
