//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in a single currency, so a [`Price`] is just an amount.
//! The currency symbol is a display concern supplied by the caller.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount.
///
/// The cart only accepts non-negative unit prices, and only while its total
/// stays representable. Plain arithmetic saturates; use the `checked_*`
/// variants to detect overflow.
///
/// # Example
///
/// ```rust
/// use greenleaf_core::Price;
///
/// let unit = Price::from_units(100);
/// assert_eq!(unit.times(2), Price::from_units(200));
/// assert_eq!(unit.display("₹"), "₹100.00");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiply by a quantity (e.g. unit price times line quantity),
    /// saturating at the representable bounds.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Multiply by a quantity, or `None` on overflow.
    #[must_use]
    pub fn checked_times(&self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Add two amounts, or `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Format for display with two decimal places (e.g. `"₹19.99"`).
    #[must_use]
    pub fn display(&self, symbol: &str) -> String {
        format!("{symbol}{:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        let price = Price::new(Decimal::new(1250, 2));
        assert_eq!(price.times(3), Price::new(Decimal::new(3750, 2)));
        assert_eq!(price.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_units(100), Price::from_units(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(150));
    }

    #[test]
    fn test_arithmetic_near_the_bounds() {
        let max = Price::new(Decimal::MAX);
        assert_eq!(max.checked_add(Price::from_units(30)), None);
        assert_eq!(max.checked_times(2), None);
        assert_eq!(max.checked_times(1), Some(max));
        assert_eq!(max + Price::from_units(30), max);
        assert_eq!(max.times(2), max);
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::from_units(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
        assert!(!Price::from_units(5).is_negative());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_units(280).display("₹"), "₹280.00");
        assert_eq!(Price::new(Decimal::new(1999, 2)).display("$"), "$19.99");
        assert_eq!(format!("{}", Price::new(Decimal::new(5, 1))), "0.50");
    }

    #[test]
    fn test_serde_as_string() {
        let price = Price::new(Decimal::new(4999, 2));
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"49.99\"");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
