//! Checkout configuration values.
//!
//! The core never reads the environment. Binaries build a [`CheckoutConfig`]
//! from wherever they keep settings and hand it to
//! [`CheckoutFlow::new`](crate::CheckoutFlow::new).

use crate::cart::DEFAULT_DELIVERY_FEE;
use crate::message::MessageEndpoint;
use crate::types::{DEFAULT_PHONE_PREFIX, Price};

/// Default number of digits required after the phone prefix.
pub const DEFAULT_PHONE_DIGITS: usize = 10;
/// Default minimum trimmed length of the customer name.
pub const DEFAULT_NAME_MIN_LEN: usize = 2;
/// Default minimum trimmed length of the delivery address.
pub const DEFAULT_ADDRESS_MIN_LEN: usize = 10;
/// Default currency symbol used in rendered prices and messages.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Settings shared by the cart, the form validators and the order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Flat fee added to any cart with a positive subtotal
    pub delivery_fee: Price,
    /// Immutable phone prefix, including its trailing separator
    pub phone_prefix: String,
    /// Digits required after the prefix
    pub phone_digits: usize,
    /// Minimum trimmed name length
    pub name_min_len: usize,
    /// Minimum trimmed address length
    pub address_min_len: usize,
    /// Symbol placed before formatted amounts
    pub currency_symbol: String,
    /// Where order messages are sent
    pub endpoint: MessageEndpoint,
}

impl CheckoutConfig {
    /// Override the delivery fee.
    #[must_use]
    pub const fn with_delivery_fee(mut self, fee: Price) -> Self {
        self.delivery_fee = fee;
        self
    }

    /// Override the phone prefix.
    #[must_use]
    pub fn with_phone_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.phone_prefix = prefix.into();
        self
    }

    /// Override the number of required phone digits.
    #[must_use]
    pub const fn with_phone_digits(mut self, digits: usize) -> Self {
        self.phone_digits = digits;
        self
    }

    /// Override the currency symbol.
    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Override the message endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: MessageEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Format an amount with the configured currency symbol.
    #[must_use]
    pub fn format_price(&self, price: Price) -> String {
        price.display(&self.currency_symbol)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delivery_fee: Price::new(DEFAULT_DELIVERY_FEE),
            phone_prefix: DEFAULT_PHONE_PREFIX.to_string(),
            phone_digits: DEFAULT_PHONE_DIGITS,
            name_min_len: DEFAULT_NAME_MIN_LEN,
            address_min_len: DEFAULT_ADDRESS_MIN_LEN,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            endpoint: MessageEndpoint::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_storefront() {
        let config = CheckoutConfig::default();
        assert_eq!(config.delivery_fee, Price::from_units(30));
        assert_eq!(config.phone_prefix, "+91 ");
        assert_eq!(config.phone_digits, 10);
        assert_eq!(config.name_min_len, 2);
        assert_eq!(config.address_min_len, 10);
        assert_eq!(config.format_price(Price::from_units(280)), "₹280.00");
    }

    #[test]
    fn test_builders() {
        let config = CheckoutConfig::default()
            .with_delivery_fee(Price::from_units(5))
            .with_phone_prefix("+1 ")
            .with_phone_digits(7)
            .with_currency_symbol("$");
        assert_eq!(config.delivery_fee, Price::from_units(5));
        assert_eq!(config.phone_prefix, "+1 ");
        assert_eq!(config.phone_digits, 7);
        assert_eq!(config.format_price(Price::from_units(5)), "$5.00");
    }
}
