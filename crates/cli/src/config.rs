//! CLI configuration loaded from environment variables.
//!
//! Every variable is optional; unset variables fall back to the
//! [`CheckoutConfig`] defaults.
//!
//! # Environment Variables
//!
//! - `GREENLEAF_DELIVERY_FEE` - Flat delivery fee (default: 30)
//! - `GREENLEAF_PHONE_PREFIX` - Fixed phone prefix (default: "+91 ")
//! - `GREENLEAF_PHONE_DIGITS` - Digits required after the prefix (default: 10)
//! - `GREENLEAF_CURRENCY_SYMBOL` - Symbol placed before amounts (default: ₹)
//! - `GREENLEAF_ORDER_ENDPOINT` - Base URL order messages are sent to
//! - `GREENLEAF_ORDER_PARAM` - Query parameter carrying the message text (default: text)

use std::str::FromStr;

use greenleaf_core::message::{DEFAULT_ENDPOINT_BASE, DEFAULT_ENDPOINT_PARAM};
use greenleaf_core::{CheckoutConfig, MessageEndpoint, Price};
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings for one CLI invocation.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub checkout: CheckoutConfig,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut checkout = CheckoutConfig::default();

        if let Some(raw) = get("GREENLEAF_DELIVERY_FEE") {
            let fee = Decimal::from_str(raw.trim())
                .map_err(|e| invalid("GREENLEAF_DELIVERY_FEE", e))?;
            if fee.is_sign_negative() {
                return Err(invalid("GREENLEAF_DELIVERY_FEE", "must not be negative"));
            }
            checkout = checkout.with_delivery_fee(Price::new(fee));
        }

        if let Some(prefix) = get("GREENLEAF_PHONE_PREFIX") {
            checkout = checkout.with_phone_prefix(prefix);
        }

        if let Some(raw) = get("GREENLEAF_PHONE_DIGITS") {
            let digits: usize = raw
                .trim()
                .parse()
                .map_err(|e| invalid("GREENLEAF_PHONE_DIGITS", e))?;
            if digits == 0 {
                return Err(invalid("GREENLEAF_PHONE_DIGITS", "must be at least 1"));
            }
            checkout = checkout.with_phone_digits(digits);
        }

        if let Some(symbol) = get("GREENLEAF_CURRENCY_SYMBOL") {
            checkout = checkout.with_currency_symbol(symbol);
        }

        let base = get("GREENLEAF_ORDER_ENDPOINT");
        let param = get("GREENLEAF_ORDER_PARAM");
        if base.is_some() || param.is_some() {
            let base = base.unwrap_or_else(|| DEFAULT_ENDPOINT_BASE.to_string());
            let param = param.unwrap_or_else(|| DEFAULT_ENDPOINT_PARAM.to_string());
            let endpoint = MessageEndpoint::parse(&base, &param)
                .map_err(|e| invalid("GREENLEAF_ORDER_ENDPOINT", e))?;
            checkout = checkout.with_endpoint(endpoint);
        }

        Ok(Self { checkout })
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}
