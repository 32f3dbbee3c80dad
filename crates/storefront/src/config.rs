//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local storefront.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG` - Path to the product catalog JSON file
//!   (default: crates/storefront/data/products.json)
//! - `STORE_NAME` - Store name used in page titles and order messages
//! - `ORDER_WHATSAPP_NUMBER` - WhatsApp number orders are handed off to,
//!   in international format without `+` (e.g. 971521234567)
//! - `ORDER_EMAIL` - Mailbox orders are handed off to
//! - `ORDER_TAX_RATE` - Tax rate applied to order totals, as a decimal
//!   fraction in `[0, 1)` (default: 0.05). The generated order message and
//!   the rendered summary both use this one rate.
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path to the product catalog JSON file
    pub catalog_path: PathBuf,
    /// Store name used in page titles and outgoing order messages
    pub store_name: String,
    /// External order-handoff recipients
    pub handoff: HandoffConfig,
    /// Tax rate applied to order totals (decimal fraction, e.g. 0.05)
    pub tax_rate: Decimal,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Recipients for the order handoff channels.
///
/// Both are fixed for the life of the process; orders are never routed per
/// request.
#[derive(Debug, Clone)]
pub struct HandoffConfig {
    /// WhatsApp number in international format without `+`
    pub whatsapp_number: String,
    /// Order mailbox address
    pub order_email: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed,
    /// or if the tax rate is outside `[0, 1)`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_host(&get_env_or_default("STOREFRONT_HOST", "127.0.0.1"))?;
        let port = parse_port(&get_env_or_default("STOREFRONT_PORT", "3000"))?;
        let catalog_path = PathBuf::from(get_env_or_default(
            "STOREFRONT_CATALOG",
            "crates/storefront/data/products.json",
        ));
        let store_name = get_env_or_default("STORE_NAME", "Amara Abayas");
        let handoff = HandoffConfig {
            whatsapp_number: get_env_or_default("ORDER_WHATSAPP_NUMBER", "971521234567"),
            order_email: get_env_or_default("ORDER_EMAIL", "orders@amara-abayas.com"),
        };
        let tax_rate = parse_tax_rate(&get_env_or_default("ORDER_TAX_RATE", "0.05"))?;
        let sentry_dsn = std::env::var("SENTRY_DSN").ok();

        Ok(Self {
            host,
            port,
            catalog_path,
            store_name,
            handoff,
            tax_rate,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_host(raw: &str) -> Result<IpAddr, ConfigError> {
    raw.parse::<IpAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string()))
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string()))
}

/// Parse and range-check the tax rate.
fn parse_tax_rate(raw: &str) -> Result<Decimal, ConfigError> {
    let rate = raw
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar("ORDER_TAX_RATE".to_string(), e.to_string()))?;
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            "ORDER_TAX_RATE".to_string(),
            format!("must be a fraction in [0, 1), got {rate}"),
        ));
    }
    Ok(rate)
}
