use anyhow::{anyhow, Context, Result};
use std::env;

/// Default listen port for the transaction gateway service.
pub const DEFAULT_GATEWAY_PORT: u16 = 10000;
/// Default listen port for the webhook receiver service.
pub const DEFAULT_WEBHOOK_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub paystack: PaystackConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Paystack API settings. The secret key doubles as the bearer credential
/// for outbound calls and the shared webhook signing secret; it must never
/// appear in logs or responses.
#[derive(Debug, Clone)]
pub struct PaystackConfig {
    pub secret_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Build configuration from process environment. `default_port` differs
    /// between the two binaries, everything else is shared.
    pub fn from_env(default_port: u16) -> Result<Self> {
        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: match env::var("PORT") {
                Ok(raw) => raw.parse().context("PORT must be a valid number")?,
                Err(_) => default_port,
            },
        };

        let paystack = PaystackConfig {
            secret_key: env::var("PAYSTACK_SECRET_KEY")
                .context("PAYSTACK_SECRET_KEY not set")?,
            base_url: env::var("PAYSTACK_BASE_URL")
                .unwrap_or_else(|_| "https://api.paystack.co".to_string()),
            timeout_secs: env::var("PAYSTACK_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("PAYSTACK_TIMEOUT_SECS must be a valid number")?,
        };

        let config = Config { server, paystack };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.paystack.secret_key.trim().is_empty() {
            return Err(anyhow!("PAYSTACK_SECRET_KEY cannot be empty"));
        }

        if self.paystack.base_url.trim().is_empty() {
            return Err(anyhow!("PAYSTACK_BASE_URL cannot be empty"));
        }

        if self.paystack.timeout_secs == 0 {
            return Err(anyhow!("PAYSTACK_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(())
    }
}
